// Domain layer: 飯店與評論的資料模型以及對外部系統的介面（ports）

pub mod model;
pub mod ports;
