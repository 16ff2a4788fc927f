/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : Graph 模块：标量计算图的核心实现
 *
 * 公开 API：
 * - `Graph`: 用户级句柄
 * - `GraphInner`: 底层实现（arena/tape）
 * - `GraphError`: 错误类型
 */

mod error;
mod handle;
mod inner;

pub use error::{GraphError, Phase};
pub use handle::Graph;
pub use inner::GraphInner;
