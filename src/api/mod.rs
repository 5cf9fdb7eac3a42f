//! HTTP API for querying normalized RSSAC002 metrics.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the
//!   service is operational.
//!
//! ## `/api/v1/{metric}` (GET)
//!
//!   `{metric}` is one of the six RSSAC002 metrics: `load-time`,
//!   `traffic-volume`, `rcode-volume`, `traffic-sizes`, `unique-sources`,
//!   or `zone-size`. Three query parameters are required:
//!
//!   * `letters` — which operators to include, as single letters, comma
//!     lists, and ascending ranges, e.g. `a`, `a,c,m`, or `b-f,j`.
//!   * `start_date` / `end_date` — an inclusive ISO date range, e.g.
//!     `2020-01-15`.
//!
//!   ```bash
//!   ❯ curl 'http://localhost:3000/api/v1/zone-size?letters=a,c&start_date=2020-01-15&end_date=2020-01-16'
//!   {"a":{"2020-01-15":{"metric":"zone-size","size":{"root":2140157}},"2020-01-16":null},"c":{...}}
//!   ```
//!
//!   The response maps each selected operator letter to a map of ISO dates;
//!   a day with no published, parseable, usable report carries `null`.
//!
//!   An invalid `letters` expression, unknown metric, or invalid date range
//!   returns HTTP 400 (Bad Request) with a JSON `{"error": ...}` body.

mod api_error;
mod model;
mod routes;
pub mod server;

pub use server::new;
