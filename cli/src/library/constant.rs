use std::{sync::LazyLock, time::Duration};

use ontap_snap_library::VERSION;

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| format!("ontap-snap/{}", *VERSION));

pub const DEFAULT_API_USER: &str = "admin";

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub const VOLUMES_PATH: &str = "/api/storage/volumes";
pub const JOBS_PATH: &str = "/api/cluster/jobs";

pub const DEFAULT_LOG_FILTER: &str = "info";
