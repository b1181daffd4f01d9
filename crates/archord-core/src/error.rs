pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("domain size must be positive, got {size}")]
    InvalidDomainSize { size: u32 },

    #[error("split position {split} lies outside the domain [0, {domain_size})")]
    SplitOutOfRange { split: u32, domain_size: u32 },

    #[error("high region start {high_start} is not the successor of split position {split}")]
    RegionBoundaryMismatch { split: u32, high_start: u32 },

    #[error("arc height ratio must be within (0, 1], got {ratio}")]
    InvalidArcHeightRatio { ratio: f64 },

    #[error("scale width must be positive and finite, got {width}")]
    InvalidScaleWidth { width: f64 },

    #[error("unknown entity id: {id}")]
    UnknownEntity { id: String },

    #[error("duplicate entity id: {id}")]
    DuplicateEntityId { id: String },

    #[error("entities {first} and {second} overlap on the position axis")]
    OverlappingEntities { first: String, second: String },

    #[error("unknown section tag: {name}")]
    UnknownSection { name: String },

    #[error("invalid configuration value: {0}")]
    ConfigJson(#[from] serde_json::Error),
}
