use thiserror::Error;

/// Error taxonomy for the crate.
///
/// Three families share this enum:
/// - validation errors, raised by [`crate::validation`] before any reference table is read,
/// - not-found errors, raised when a well-formed identifier matches no reference-table entry
///   (these carry the full list of valid alternatives for user correction),
/// - data errors, raised when a packaged table or a remote archive resource is unavailable.
///
/// An empty query result is **not** an error: spatial and temporal queries return empty
/// collections and log an informational notice instead.
#[derive(Error, Debug)]
pub enum TidarError {
    #[error("[{field}]: {field} is required")]
    MissingField { field: &'static str },

    #[error("[{field}]: Latitude must be between 90 and -90, current value = '{value}'")]
    LatitudeOutOfRange { field: &'static str, value: f64 },

    #[error("[{field}]: Longitude must be between 0 and 360, current value = '{value}'")]
    LongitudeOutOfRange { field: &'static str, value: f64 },

    #[error("[{axis}]: {max_field} must be greater than {min_field}")]
    InvertedRange {
        axis: &'static str,
        min_field: &'static str,
        max_field: &'static str,
    },

    #[error("[{field}]: Must be a value from {min} to {max}, not '{value}'")]
    FieldOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Requires either a {first} OR a {second}, not both")]
    MutuallyExclusive {
        first: &'static str,
        second: &'static str,
    },

    #[error("Requires either a {first} OR a {second}")]
    MissingEither {
        first: &'static str,
        second: &'static str,
    },

    #[error("[resolution]: resolution '{resolution}' must be a valid resolution type in {valid:?}")]
    InvalidResolution { resolution: char, valid: Vec<char> },

    #[error("[segment_num]: '{segment}' not an available segment option {options:?}")]
    UnknownSegment {
        segment: String,
        options: Vec<String>,
    },

    #[error("[flyby_id]: '{id}' not in available ids options {available:?}")]
    UnknownFlybyId { id: String, available: Vec<String> },

    #[error("[flyby_observation_num]: '{number}' not in available observation options {available:?}")]
    UnknownObservationNumber {
        number: String,
        available: Vec<String>,
    },

    #[error("Feature Name '{name}' not in available features list = {available:?}")]
    UnknownFeatureName {
        name: String,
        available: Vec<String>,
    },

    #[error("[section_to_print]: Cannot find a relevant section_to_print: Invalid '{section}'")]
    UnknownReadmeSection { section: String },

    #[error("Specify {section} as either '{section} UNCOMPRESSED' or '{section} COMPRESSED'")]
    AmbiguousReadmeSection { section: String },

    #[error("Reference table '{table}' unavailable: {detail}")]
    TableUnavailable { table: &'static str, detail: String },

    #[error("Invalid PDS timestamp: '{value}'")]
    TimestampParse { value: String },

    #[error("No table with id 'indexlist' in listing at: {url}")]
    RemoteListingNotFound { url: String },

    #[error(
        "No BIDR files found with resolution, segment, and flyby identification. \
         Please use different parameters to retrieve data. All files found: {all_files:?}"
    )]
    NoMatchingBidrFiles { all_files: Vec<String> },

    #[error("'{directory}' does not contain AAREADME.TXT")]
    MissingAareadme { directory: String },

    #[error("No .LBL file found at {directory}")]
    LblFileNotFound { directory: String },

    #[error("Multiple .LBL files found = {files:?}, need to choose one to read from")]
    MultipleLblFiles { files: Vec<String> },

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP ureq error: {0}")]
    UreqHttpError(#[from] ureq::Error),

    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Zip extraction error: {0}")]
    ZipError(#[from] zip::result::ZipError),
}

impl TidarError {
    /// Whether this error belongs to the validation family (raised before any table access).
    pub fn is_validation(&self) -> bool {
        use TidarError::*;
        matches!(
            self,
            MissingField { .. }
                | LatitudeOutOfRange { .. }
                | LongitudeOutOfRange { .. }
                | InvertedRange { .. }
                | FieldOutOfRange { .. }
                | MutuallyExclusive { .. }
                | MissingEither { .. }
                | InvalidResolution { .. }
        )
    }
}

impl PartialEq for TidarError {
    fn eq(&self, other: &Self) -> bool {
        use TidarError::*;
        match (self, other) {
            (MissingField { field: a }, MissingField { field: b }) => a == b,
            (
                LatitudeOutOfRange { field: a, value: x },
                LatitudeOutOfRange { field: b, value: y },
            ) => a == b && x == y,
            (
                LongitudeOutOfRange { field: a, value: x },
                LongitudeOutOfRange { field: b, value: y },
            ) => a == b && x == y,
            (
                InvertedRange {
                    axis: a,
                    min_field: m1,
                    max_field: m2,
                },
                InvertedRange {
                    axis: b,
                    min_field: n1,
                    max_field: n2,
                },
            ) => a == b && m1 == n1 && m2 == n2,
            (
                FieldOutOfRange {
                    field: a,
                    value: v1,
                    min: mn1,
                    max: mx1,
                },
                FieldOutOfRange {
                    field: b,
                    value: v2,
                    min: mn2,
                    max: mx2,
                },
            ) => a == b && v1 == v2 && mn1 == mn2 && mx1 == mx2,
            (
                MutuallyExclusive {
                    first: a,
                    second: x,
                },
                MutuallyExclusive {
                    first: b,
                    second: y,
                },
            ) => a == b && x == y,
            (
                MissingEither {
                    first: a,
                    second: x,
                },
                MissingEither {
                    first: b,
                    second: y,
                },
            ) => a == b && x == y,
            (
                InvalidResolution {
                    resolution: a,
                    valid: x,
                },
                InvalidResolution {
                    resolution: b,
                    valid: y,
                },
            ) => a == b && x == y,
            (
                UnknownSegment {
                    segment: a,
                    options: x,
                },
                UnknownSegment {
                    segment: b,
                    options: y,
                },
            ) => a == b && x == y,
            (
                UnknownFlybyId {
                    id: a,
                    available: x,
                },
                UnknownFlybyId {
                    id: b,
                    available: y,
                },
            ) => a == b && x == y,
            (
                UnknownObservationNumber {
                    number: a,
                    available: x,
                },
                UnknownObservationNumber {
                    number: b,
                    available: y,
                },
            ) => a == b && x == y,
            (
                UnknownFeatureName {
                    name: a,
                    available: x,
                },
                UnknownFeatureName {
                    name: b,
                    available: y,
                },
            ) => a == b && x == y,
            (UnknownReadmeSection { section: a }, UnknownReadmeSection { section: b }) => a == b,
            (AmbiguousReadmeSection { section: a }, AmbiguousReadmeSection { section: b }) => {
                a == b
            }
            (
                TableUnavailable {
                    table: a,
                    detail: x,
                },
                TableUnavailable {
                    table: b,
                    detail: y,
                },
            ) => a == b && x == y,
            (TimestampParse { value: a }, TimestampParse { value: b }) => a == b,
            (RemoteListingNotFound { url: a }, RemoteListingNotFound { url: b }) => a == b,
            (NoMatchingBidrFiles { all_files: a }, NoMatchingBidrFiles { all_files: b }) => a == b,
            (MissingAareadme { directory: a }, MissingAareadme { directory: b }) => a == b,
            (LblFileNotFound { directory: a }, LblFileNotFound { directory: b }) => a == b,
            (MultipleLblFiles { files: a }, MultipleLblFiles { files: b }) => a == b,

            // Source-carrying variants are not comparable: equal on same variant
            (IoError(_), IoError(_)) => true,
            (UreqHttpError(_), UreqHttpError(_)) => true,
            (ReqwestError(_), ReqwestError(_)) => true,
            (ZipError(_), ZipError(_)) => true,

            _ => false,
        }
    }
}
