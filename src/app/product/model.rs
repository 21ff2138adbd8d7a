//! 产品数据模型

use serde::{Deserialize, Deserializer, Serialize};

/// 远程集合中的一条产品记录
///
/// `id` 与 `price` 在 API 响应中可能是数字也可能是文本，反序列化时统一转换为数值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
}

impl Product {
    /// 两位小数的价格文本
    pub fn display_price(&self) -> String {
        format!("{:.2}", self.price)
    }
}

/// 数字或数字文本
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberOrText {
    pub fn to_id(&self) -> Result<i64, String> {
        match self {
            NumberOrText::Int(v) => Ok(*v),
            NumberOrText::Float(v) => float_to_id(*v).ok_or_else(|| format!("invalid id {}", v)),
            NumberOrText::Text(text) => {
                let trimmed = text.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_id))
                    .ok_or_else(|| format!("invalid id {:?}", text))
            }
        }
    }

    pub fn to_price(&self) -> Result<f64, String> {
        let value = match self {
            NumberOrText::Int(v) => *v as f64,
            NumberOrText::Float(v) => *v,
            NumberOrText::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid price {:?}", text))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("invalid price {}", value))
        }
    }
}

/// 仅接受整数且落在 i64 范围内的值，超出范围的 id 不做截断
fn float_to_id(value: f64) -> Option<i64> {
    // 2^63 本身不可表示为 i64，上界取开区间
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    if value.is_finite() && value.fract() == 0.0 && value >= -UPPER && value < UPPER {
        Some(value as i64)
    } else {
        None
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrText::deserialize(deserializer)?
        .to_id()
        .map_err(serde::de::Error::custom)
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrText::deserialize(deserializer)?
        .to_price()
        .map_err(serde::de::Error::custom)
}

/// 表单草稿
///
/// `price` 保存用户输入的原始文本，提交时才解析。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub name: String,
    pub price: String,
    /// 正在编辑的产品；为 `None` 时提交即新建
    pub editing: Option<Product>,
}

impl Draft {
    /// 名称与价格均非空时才允许提交
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty() && !self.price.is_empty()
    }

    /// 用产品当前的值填充表单并进入编辑模式
    pub fn seed_from(&mut self, product: &Product) {
        self.name = product.name.clone();
        self.price = product.price.to_string();
        self.editing = Some(product.clone());
    }

    pub fn clear(&mut self) {
        *self = Draft::default();
    }

    pub fn to_payload(&self) -> ProductPayload {
        ProductPayload {
            id: self.editing.as_ref().map(|p| p.id),
            name: self.name.clone(),
            price: parse_float(&self.price),
        }
    }
}

/// 新建 / 更新请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    /// 无法解析为数字时序列化为 `null`
    pub price: Option<f64>,
}

/// 删除请求体
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeletePayload {
    pub id: i64,
}

/// 解析文本开头的浮点数前缀，忽略其后的多余字符
///
/// `"15.5"` → `15.5`，`"12abc"` → `12`，`"abc"` → `None`。
pub fn parse_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits + (frac_end - frac_start) > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
