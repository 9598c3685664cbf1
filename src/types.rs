//! 通用类型定义
//!
//! 边权提取 trait，以及编辑器使用的顶点/边载荷类型

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 从边载荷中提取数值权重
///
/// 数值类型返回自身的值；其他类型使用默认实现返回 `None`，
/// 此时边权按 0 处理。最短路径算法假定权重非负。
pub trait EdgeWeight {
    fn numeric_value(&self) -> Option<f64> {
        None
    }
}

macro_rules! impl_numeric_weight {
    ($($t:ty),*) => {
        $(
            impl EdgeWeight for $t {
                fn numeric_value(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_numeric_weight!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl EdgeWeight for () {}
impl EdgeWeight for bool {}
impl EdgeWeight for char {}
impl EdgeWeight for String {}
impl EdgeWeight for &str {}

impl<T: EdgeWeight> EdgeWeight for Option<T> {
    fn numeric_value(&self) -> Option<f64> {
        self.as_ref().and_then(EdgeWeight::numeric_value)
    }
}

/// 画布坐标
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 编辑器中的顶点载荷
///
/// 相等性与哈希只看名称，同一张图中名称唯一。
/// 实现了 `Borrow<str>`，可以直接按名称查找顶点。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexData {
    pub name: String,
    pub location: Point,
}

impl VertexData {
    pub fn new(name: impl Into<String>, location: Point) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Point {
        self.location
    }
}

impl PartialEq for VertexData {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for VertexData {}

impl Hash for VertexData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // 必须与 str 的哈希一致，Borrow<str> 查找依赖这一点
        self.name.as_str().hash(state);
    }
}

impl Borrow<str> for VertexData {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for VertexData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// 编辑器中的边载荷，长度即最短路径使用的权重
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub length: f64,
}

impl EdgeData {
    pub fn new(length: f64) -> Self {
        Self { length }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }
}

impl EdgeWeight for EdgeData {
    fn numeric_value(&self) -> Option<f64> {
        Some(self.length)
    }
}

impl fmt::Display for EdgeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_length(self.length))
    }
}

/// 格式化长度：整数值保留一位小数（`3` 输出为 `3.0`），与导出文件格式保持一致
pub fn format_length(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
