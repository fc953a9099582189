pub const APP_NAME: &str = "clusterstore";

/// File holding a cluster's snapshot for the opaque filesystem-family backends.
pub const STATE_FILENAME: &str = "cluster.state";

/// File holding a cluster's snapshot for the JSON filesystem backend.
pub const JSON_STATE_FILENAME: &str = "cluster.json";

/// Object name suffix under `<prefix>/<cluster>/` in object storage.
pub const OBJECT_STATE_NAME: &str = "cluster.state";

pub const MAX_CLUSTER_NAME_LEN: usize = 128;

/// Region used for object storage when no bucket location is configured.
pub const DEFAULT_BUCKET_LOCATION: &str = "us-east-1";

/// Identity used for state commits when the repository has none configured.
pub const GIT_FALLBACK_NAME: &str = APP_NAME;
pub const GIT_FALLBACK_EMAIL: &str = "clusterstore@localhost";

pub const HASH_PREFIX_LEN: usize = 12;
