//! Wire DTOs for the CMS API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the mock-server crate; integration tests catch any drift between the
//! two. Field names follow the wire contract exactly (camelCase), ids are
//! opaque strings, and dates inside history entries stay as the wire strings
//! they arrive as — nothing downstream interprets them.
//!
//! Read DTOs derive `Deserialize`, write DTOs derive `Serialize`; both are
//! derived where test vectors round-trip the type. Nullable contract fields
//! are `Option` and serialize as explicit `null`, matching the original API.

use serde::{Deserialize, Serialize};

/// One server-paginated slice of a collection plus pagination metadata.
///
/// `page` is 1-indexed; `totalPages == ceil(total / limit)` is guaranteed by
/// the server and not re-validated here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto<T> {
    pub limit: u32,
    pub page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub results: Vec<T>,
}

/// Creation acknowledgment returned by every `POST /api/<resource>` route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateResponseDto {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShowDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub moderators: Vec<ModeratorDto>,
    pub profile_image: Option<ImageAssetDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModeratorDto {
    pub id: String,
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageAssetDto {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShowDto {
    pub name: String,
    pub description: String,
    pub moderator_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShowDto {
    pub name: String,
    pub description: String,
    pub moderator_ids: Vec<String>,
}

/// Body of `PUT /api/show-management/<id>/profile-image`, linking a show to
/// a previously uploaded image asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShowImageDto {
    pub profile_image_id: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// One row of `GET /api/user-management/pagination`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationUserDto {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub email: String,
    pub roles: Vec<String>,
    pub status: String,
}

/// Body of `GET /api/user-management/<id>`. The id is not echoed back; the
/// caller already has it and threads it into the domain mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetByIdUserDto {
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub abouth: String,
    pub profile_image_id: String,
    pub is_active: bool,
    pub prefer_nickname_over_name: bool,
    pub external_id: Option<String>,
    pub email: Option<String>,
    pub role_history: Vec<UserRoleHistoryDto>,
    pub membership_history: Vec<UserMembershipHistoryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub prefer_nickname_over_name: bool,
    pub abouth: String,
    pub email: Option<String>,
    pub password: String,
    pub role_history: Vec<UserRoleHistoryDto>,
    pub membership_history: Vec<UserMembershipHistoryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserDto {
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub abouth: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleHistoryDto {
    pub function_end_date: Option<String>,
    pub function_start_date: String,
    pub role_id: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserMembershipHistoryDto {
    pub membership_id: String,
    pub description: Option<String>,
    pub change_date: String,
}

// ---------------------------------------------------------------------------
// Role / membership lookups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllRolesDto {
    pub roles: Vec<RoleDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MembershipDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllMembershipsDto {
    pub memberships: Vec<MembershipDto>,
}
