//! Stateless HTTP request builder and response parser for the CMS API.
//!
//! # Design
//! `CmsClient` holds only a `base_url` and carries no mutable state between
//! calls. Each resource operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse` and yields a domain value. The caller executes the actual
//! HTTP round-trip, keeping the core deterministic and free of I/O
//! dependencies.
//!
//! Every response with status ≥ 400 fails with `ApiError::Request` carrying
//! the status and the body as opaque text; there is no retry and no
//! recovery. Get-by-id with no id at hand means no request is built at all —
//! that branch belongs to the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{Membership, Page, Role, SelectableItem, Show, UserDetails, UserSummary};
use crate::error::ApiError;
use crate::http::{FilePart, HttpMethod, HttpRequest, HttpResponse, MultipartForm, RequestBody};
use crate::types::{
    AllMembershipsDto, AllRolesDto, CreateResponseDto, CreateShowDto, CreateUserDto,
    GetByIdUserDto, PaginationDto, PaginationUserDto, ShowDto, UpdateShowDto, UpdateShowImageDto,
    UpdateUserDto,
};

const SHOW_MANAGEMENT: &str = "/api/show-management";
const USER_MANAGEMENT: &str = "/api/user-management";
const IMAGE_ASSET_MANAGEMENT: &str = "/api/image-asset-management";

/// Synchronous, stateless client for the CMS API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct CmsClient {
    base_url: String,
}

impl CmsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json(
        &self,
        method: HttpMethod,
        path: String,
        body: &impl Serialize,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(RequestBody::Json(body)),
        })
    }

    fn delete(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    // -----------------------------------------------------------------------
    // Shows
    // -----------------------------------------------------------------------

    pub fn build_show_pagination(&self, limit: u32, page: u32) -> HttpRequest {
        self.get(format!("{SHOW_MANAGEMENT}/pagination?limit={limit}&page={page}"))
    }

    pub fn parse_show_pagination(&self, response: HttpResponse) -> Result<Page<Show>, ApiError> {
        check_status(&response)?;
        let dto: PaginationDto<ShowDto> = parse_json(&response)?;
        Ok(Page::from_dto(dto, Show::from_dto))
    }

    pub fn build_get_show(&self, id: &str) -> HttpRequest {
        self.get(format!("{SHOW_MANAGEMENT}/{id}"))
    }

    pub fn parse_get_show(&self, response: HttpResponse) -> Result<Show, ApiError> {
        check_status(&response)?;
        Ok(Show::from_dto(parse_json(&response)?))
    }

    pub fn build_create_show(&self, input: &CreateShowDto) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, SHOW_MANAGEMENT.to_string(), input)
    }

    /// Returns the id of the created show.
    pub fn parse_create_show(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        let dto: CreateResponseDto = parse_json(&response)?;
        Ok(dto.id)
    }

    pub fn build_update_show(
        &self,
        id: &str,
        input: &UpdateShowDto,
    ) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Put, format!("{SHOW_MANAGEMENT}/{id}"), input)
    }

    pub fn parse_update_show(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn build_update_show_image(
        &self,
        id: &str,
        input: &UpdateShowImageDto,
    ) -> Result<HttpRequest, ApiError> {
        self.json(
            HttpMethod::Put,
            format!("{SHOW_MANAGEMENT}/{id}/profile-image"),
            input,
        )
    }

    pub fn parse_update_show_image(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn build_delete_show(&self, id: &str) -> HttpRequest {
        self.delete(format!("{SHOW_MANAGEMENT}/{id}"))
    }

    pub fn parse_delete_show(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub fn build_user_pagination(&self, limit: u32, page: u32) -> HttpRequest {
        self.get(format!("{USER_MANAGEMENT}/pagination?limit={limit}&page={page}"))
    }

    pub fn parse_user_pagination(
        &self,
        response: HttpResponse,
    ) -> Result<Page<UserSummary>, ApiError> {
        check_status(&response)?;
        let dto: PaginationDto<PaginationUserDto> = parse_json(&response)?;
        Ok(Page::from_dto(dto, UserSummary::from_dto))
    }

    /// Pagination parse composed with the select-option conversion: the page
    /// a `MultiSelect` bound to the user collection consumes.
    pub fn parse_user_options(
        &self,
        response: HttpResponse,
    ) -> Result<Page<SelectableItem>, ApiError> {
        Ok(self
            .parse_user_pagination(response)?
            .map(|user| user.to_select_item()))
    }

    pub fn build_get_user(&self, id: &str) -> HttpRequest {
        self.get(format!("{USER_MANAGEMENT}/{id}"))
    }

    /// The detail body does not echo the id, so it is threaded back in here.
    pub fn parse_get_user(&self, id: &str, response: HttpResponse) -> Result<UserDetails, ApiError> {
        check_status(&response)?;
        let dto: GetByIdUserDto = parse_json(&response)?;
        Ok(UserDetails::from_dto(id.to_string(), dto))
    }

    pub fn build_create_user(&self, input: &CreateUserDto) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, USER_MANAGEMENT.to_string(), input)
    }

    /// Returns the id of the created user.
    pub fn parse_create_user(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        let dto: CreateResponseDto = parse_json(&response)?;
        Ok(dto.id)
    }

    pub fn build_update_user(
        &self,
        id: &str,
        input: &UpdateUserDto,
    ) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Put, format!("{USER_MANAGEMENT}/{id}"), input)
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn build_delete_user(&self, id: &str) -> HttpRequest {
        self.delete(format!("{USER_MANAGEMENT}/{id}"))
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn build_all_roles(&self) -> HttpRequest {
        self.get(format!("{USER_MANAGEMENT}/all-roles"))
    }

    pub fn parse_all_roles(&self, response: HttpResponse) -> Result<Vec<Role>, ApiError> {
        check_status(&response)?;
        let dto: AllRolesDto = parse_json(&response)?;
        Ok(dto.roles.into_iter().map(Role::from_dto).collect())
    }

    pub fn build_all_memberships(&self) -> HttpRequest {
        self.get(format!("{USER_MANAGEMENT}/all-memberships"))
    }

    pub fn parse_all_memberships(&self, response: HttpResponse) -> Result<Vec<Membership>, ApiError> {
        check_status(&response)?;
        let dto: AllMembershipsDto = parse_json(&response)?;
        Ok(dto.memberships.into_iter().map(Membership::from_dto).collect())
    }

    // -----------------------------------------------------------------------
    // Image assets
    // -----------------------------------------------------------------------

    pub fn build_upload_show_image(&self, show_id: &str, image: FilePart) -> HttpRequest {
        self.upload("show-profile", "showId", show_id, image)
    }

    pub fn build_upload_user_image(&self, user_id: &str, image: FilePart) -> HttpRequest {
        self.upload("user-profile", "userId", user_id, image)
    }

    fn upload(&self, kind: &str, owner_field: &str, owner_id: &str, image: FilePart) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{IMAGE_ASSET_MANAGEMENT}/{kind}", self.base_url),
            // content-type is boundary-dependent; the host sets it when
            // encoding the form.
            headers: Vec::new(),
            body: Some(RequestBody::Multipart(MultipartForm {
                fields: vec![(owner_field.to_string(), owner_id.to_string())],
                file: image,
            })),
        }
    }

    /// Returns the plain-text id of the stored asset.
    pub fn parse_upload_image(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        Ok(response.body)
    }
}

/// Uniform failure rule of the CMS contract: any status ≥ 400 is an error,
/// with the body carried as opaque text.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status >= 400 {
        return Err(ApiError::Request {
            status: response.status,
            text: response.body.clone(),
        });
    }
    Ok(())
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Mapping(e.to_string()))
}
