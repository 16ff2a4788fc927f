use crate::tensor::Tensor;
use std::fmt;

/// 每行输出为"[ v1 v2 ... ]"；已被释放的节点显示为"?"
impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            write!(f, "[ ")?;
            for var in row {
                match var.value() {
                    Ok(v) => write!(f, "{v:?} ")?,
                    Err(_) => write!(f, "? ")?,
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
