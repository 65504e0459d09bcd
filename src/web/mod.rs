//! JSON API for header validation.
//!
//! This module exposes the rule registry, the validator and the import gate
//! over HTTP using Axum. Clients send header lists they extracted themselves;
//! the server never reads datasets.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! vdj-import serve
//!
//! # Bind to all interfaces on a custom port
//! vdj-import serve --address 0.0.0.0 --port 3000
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/formats` - List formats with their required columns
//! - `POST /api/validate` - Validate headers against a format
//! - `POST /api/gate` - Check import arguments and, if present, headers
//!
//! ```text
//! curl -s localhost:8080/api/validate \
//!     -H 'content-type: application/json' \
//!     -d '{"format": "airr-sc", "headers": ["duplicate_count", "junction", "v_call", "j_call"]}'
//! ```

pub mod server;
