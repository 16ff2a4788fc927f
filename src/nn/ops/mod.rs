/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : 神经元三阶段（receive → combine → activate）所用的函数策略、损失函数与输入构造
 *
 * 每个阶段都是一个小而封闭的命名策略集合，可按层/神经元选择：
 * - receive.rs: 接收（行拼接）
 * - combine.rs: 组合（线性、恒等）
 * - activation.rs: 激活（恒等、tanh、sigmoid、softmax）
 * - loss.rs: 损失（交叉熵、平方误差、二元交叉熵）
 * - input.rs: 数值向量 → 输入张量
 */

mod activation;
mod combine;
mod input;
mod loss;
mod receive;

pub use activation::{Activate, ActivateFn, Identity, Sigmoid, Softmax, Tanh, sigmoid, tanh};
pub use combine::CombineFn;
pub use input::{parse_vector, vector_to_normalized_tensor, vector_to_tensor};
pub use loss::{BinaryCrossEntropy, CrossEntropy, Loss, LossFunction, SquaredError};
pub use receive::ReceiveFn;
