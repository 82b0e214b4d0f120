//! Deterministic client core for the CMS management API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and drives the scroll-fed
//! paginated multi-select used by the management forms as an explicit state
//! machine. The caller executes the actual HTTP round-trips, making the core
//! fully deterministic and testable.
//!
//! # Design
//! - `CmsClient` is stateless — it holds only `base_url`.
//! - Each resource operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response, maps DTOs into domain values), so the I/O
//!   boundary is explicit.
//! - `MultiSelect` owns the pagination/selection state of one bound form
//!   field: it emits `FetchCommand`s and consumes generation-tagged
//!   completions, so overlapping fetches cannot happen and completions for a
//!   re-mounted field are discarded.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod domain;
pub mod error;
pub mod http;
pub mod select;
pub mod types;

pub use client::CmsClient;
pub use domain::{
    ImageAsset, Membership, Moderator, Page, Role, SelectableItem, Show, UserDetails, UserSummary,
};
pub use error::ApiError;
pub use http::{FilePart, HttpMethod, HttpRequest, HttpResponse, MultipartForm, RequestBody};
pub use select::{FetchCommand, FieldError, FieldErrorKind, MultiSelect, SelectionSink};
pub use types::{
    CreateShowDto, CreateUserDto, UpdateShowDto, UpdateShowImageDto, UpdateUserDto,
};
