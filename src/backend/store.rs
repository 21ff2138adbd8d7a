//! 内存产品存储

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::app::product::model::Product;

#[derive(Default)]
struct Inner {
    products: BTreeMap<i64, Product>,
    last_id: i64,
}

/// 线程安全的内存产品表，id 自增、从 1 开始
#[derive(Clone, Default)]
pub struct ProductStore {
    inner: Arc<Mutex<Inner>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定的名称与价格预置数据
    pub fn seeded<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let store = Self::new();
        for (name, price) in rows {
            store.create(name.into(), price);
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // 持锁期间不会 panic，中毒后数据仍然一致
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 按 id 升序返回全部产品
    pub fn list(&self) -> Vec<Product> {
        self.lock().products.values().cloned().collect()
    }

    pub fn create(&self, name: String, price: f64) -> Product {
        let mut inner = self.lock();
        inner.last_id += 1;
        let product = Product {
            id: inner.last_id,
            name,
            price,
        };
        inner.products.insert(product.id, product.clone());
        product
    }

    pub fn update(&self, id: i64, name: String, price: f64) -> Option<Product> {
        let mut inner = self.lock();
        let product = inner.products.get_mut(&id)?;
        product.name = name;
        product.price = price;
        Some(product.clone())
    }

    pub fn delete(&self, id: i64) -> bool {
        self.lock().products.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_crud() {
        let store = ProductStore::seeded([("Pen", 15.5), ("Ink", 3.0)]);
        assert_eq!(store.len(), 2);

        let pad = store.create("Pad".into(), 7.25);
        assert_eq!(pad.id, 3);

        let updated = store.update(1, "Gel Pen".into(), 16.0).unwrap();
        assert_eq!(updated.name, "Gel Pen");
        assert!(store.update(42, "Ghost".into(), 1.0).is_none());

        assert!(store.delete(2));
        assert!(!store.delete(2));

        let ids: Vec<i64> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // 删除后不复用 id
        assert_eq!(store.create("Clip".into(), 0.5).id, 4);
    }
}
