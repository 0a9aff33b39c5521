//! Process-level toggles, given from environment variables and lazy initialized when
//! needed.

use once_cell::race::OnceBool;
use std::env;


/// Return true if every block placed by a generator should emit a trace event.
///
/// To enable this feature, set `MCFEAT_TRACE_WRITES=1`.
pub fn trace_writes() -> bool {
    static ENV: OnceBool = OnceBool::new();
    ENV.get_or_init(|| {
        env::var_os("MCFEAT_TRACE_WRITES")
            .map(|s| s.as_encoded_bytes() == b"1")
            .unwrap_or(false)
    })
}
