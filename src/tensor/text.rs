/*
 * @Author       : 老董
 * @Date         : 2026-03-04
 * @Description  : 张量数值的文本（反）序列化，格式为"[v1, v2], [v3, v4]"，每组方括号对应一行
 *                 注：只保存数值，梯度与计算图结构从不保存
 */

use crate::errors::TensorError;
use crate::nn::{Graph, GraphError};
use crate::tensor::Tensor;

impl Tensor {
    /// 将数值转换为文本，如1x2张量输出"[0.5, -1.0]"
    pub fn to_text(&self) -> Result<String, GraphError> {
        let rows = self
            .values_2d()?
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|v| format!("{v:?}")).collect();
                format!("[{}]", cells.join(", "))
            })
            .collect::<Vec<_>>();
        Ok(rows.join(", "))
    }

    /// 从文本解析张量，元素为不需要求导的新叶子节点
    pub fn from_text(graph: &Graph, text: &str) -> Result<Self, TensorError> {
        Self::from_text_with_grad(graph, text, false)
    }

    /// 从文本解析张量，并指定元素是否需要求导（加载模型参数时使用）
    pub fn from_text_with_grad(
        graph: &Graph,
        text: &str,
        requires_grad: bool,
    ) -> Result<Self, TensorError> {
        let rows = parse_rows(text)?;
        Self::from_values(graph, &rows, requires_grad)
    }
}

/// 解析"[1, 2], [3, 4]"为按行的数值；方括号之外只允许逗号与空白
fn parse_rows(text: &str) -> Result<Vec<Vec<f64>>, TensorError> {
    let parse_error = || TensorError::Parse(text.to_string());
    let mut rows = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        if rest.is_empty() {
            break;
        }
        let body = rest.strip_prefix('[').ok_or_else(parse_error)?;
        let end = body.find(']').ok_or_else(parse_error)?;
        let row = body[..end]
            .split(',')
            .map(|cell| cell.trim().parse::<f64>().map_err(|_| parse_error()))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
        rest = &body[end + 1..];
    }

    if rows.is_empty() {
        return Err(parse_error());
    }
    Ok(rows)
}
