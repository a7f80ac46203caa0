pub mod loaders;

pub use loaders::GltfLoader;
