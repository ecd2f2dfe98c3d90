mod hostname_resolver;

pub use hostname_resolver::ClientNameResolver;
