mod extension;

pub use extension::{ContainerReport, Manifest, MessageTable, OutputFormat};
