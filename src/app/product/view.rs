//! 文本视图渲染

use std::fmt::Write;

use super::controller::{DraftState, ListState};

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No products found.";

/// 渲染列表状态
///
/// 错误信息置顶；加载中显示占位文本；快照为空且未在加载时显示空状态。
pub fn render(list: &ListState, currency: &str) -> String {
    let mut out = String::new();

    if let Some(error) = &list.error {
        let _ = writeln!(out, "Failed: {}", error);
    }

    if list.loading {
        let _ = writeln!(out, "{}", LOADING_TEXT);
    } else if list.products.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_TEXT);
    }

    let width = list
        .products
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);
    for product in &list.products {
        let _ = writeln!(
            out,
            "#{:<4} {:<width$}  {}{}",
            product.id,
            product.name,
            currency,
            product.display_price(),
            width = width
        );
    }

    out
}

/// 渲染表单状态
pub fn render_form(draft: &DraftState) -> String {
    let title = match &draft.editing {
        Some(product) => format!("Editing #{}", product.id),
        None => "New product".to_string(),
    };
    format!("{}\n  name:  {}\n  price: {}\n", title, draft.name, draft.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::model::Product;

    #[test]
    fn test_render_loading() {
        let list = ListState {
            loading: true,
            ..Default::default()
        };
        assert_eq!(render(&list, "₱"), "Loading...\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&ListState::default(), "₱"), "No products found.\n");
    }

    #[test]
    fn test_render_error_keeps_rows() {
        let list = ListState {
            products: vec![
                Product { id: 1, name: "Pen".into(), price: 15.5 },
                Product { id: 12, name: "Notebook".into(), price: 3.0 },
            ],
            error: Some("Error: 500".into()),
            ..Default::default()
        };
        let text = render(&list, "₱");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Failed: Error: 500");
        assert_eq!(lines[1], "#1    Pen       ₱15.50");
        assert_eq!(lines[2], "#12   Notebook  ₱3.00");
        assert!(!text.contains(EMPTY_TEXT));
    }

    #[test]
    fn test_render_form() {
        let mut draft = DraftState::default();
        assert!(render_form(&draft).starts_with("New product"));

        draft.seed_from(&Product { id: 4, name: "Ink".into(), price: 2.5 });
        assert_eq!(render_form(&draft), "Editing #4\n  name:  Ink\n  price: 2.5\n");
    }
}
