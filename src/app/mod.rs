pub mod enricher;
pub mod exporter;
pub mod listing;
pub mod pipelines;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;
