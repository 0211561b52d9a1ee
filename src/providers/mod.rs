pub mod fallback;
pub mod local;
pub mod remote;

pub use fallback::FallbackProvider;
pub use local::LocalFileProvider;
pub use remote::RemoteDatasetProvider;
