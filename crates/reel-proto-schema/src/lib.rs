pub mod catalog {
    pub mod v1;
}

pub mod v1 {
    pub use crate::catalog::v1::*;
}
