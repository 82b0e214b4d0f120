use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Pagination envelope shared by every `/pagination` route.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    pub limit: u32,
    pub page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub results: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateResponse {
    pub id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: String,
    pub name: String,
    pub description: String,
    pub moderators: Vec<Moderator>,
    pub profile_image: Option<ImageAsset>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Moderator {
    pub id: String,
    pub nickname: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageAsset {
    pub id: String,
    pub url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShow {
    pub name: String,
    pub description: String,
    pub moderator_ids: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShow {
    pub name: String,
    pub description: String,
    pub moderator_ids: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShowImage {
    pub profile_image_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleHistory {
    pub function_end_date: Option<String>,
    pub function_start_date: String,
    pub role_id: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipHistory {
    pub membership_id: String,
    pub description: Option<String>,
    pub change_date: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub prefer_nickname_over_name: bool,
    pub abouth: String,
    pub email: Option<String>,
    pub password: String,
    pub role_history: Vec<RoleHistory>,
    pub membership_history: Vec<MembershipHistory>,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub abouth: String,
}

/// One row of the user pagination listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub email: String,
    pub roles: Vec<String>,
    pub status: String,
}

/// The user detail body. The id is not echoed back.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub abouth: String,
    pub profile_image_id: String,
    pub is_active: bool,
    pub prefer_nickname_over_name: bool,
    pub external_id: Option<String>,
    pub email: Option<String>,
    pub role_history: Vec<RoleHistory>,
    pub membership_history: Vec<MembershipHistory>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AllRoles {
    pub roles: Vec<NamedEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AllMemberships {
    pub memberships: Vec<NamedEntry>,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub prefer_nickname_over_name: bool,
    pub abouth: String,
    pub email: Option<String>,
    pub password: String,
    pub profile_image_id: String,
    pub is_active: bool,
    pub external_id: Option<String>,
    pub role_history: Vec<RoleHistory>,
    pub membership_history: Vec<MembershipHistory>,
}

impl User {
    fn row(&self) -> UserRow {
        UserRow {
            id: self.id.clone(),
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            nickname: self.nickname.clone(),
            email: self.email.clone().unwrap_or_default(),
            roles: self.role_history.iter().map(|h| h.role_id.clone()).collect(),
            status: if self.is_active { "active" } else { "inactive" }.to_string(),
        }
    }

    fn detail(&self) -> UserDetail {
        UserDetail {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            nickname: self.nickname.clone(),
            abouth: self.abouth.clone(),
            profile_image_id: self.profile_image_id.clone(),
            is_active: self.is_active,
            prefer_nickname_over_name: self.prefer_nickname_over_name,
            external_id: self.external_id.clone(),
            email: self.email.clone(),
            role_history: self.role_history.clone(),
            membership_history: self.membership_history.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Asset {
    pub id: String,
    pub kind: String,
    pub owner_id: String,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// In-memory backing store. Insertion-ordered so pagination is deterministic.
#[derive(Debug, Default)]
pub struct Store {
    pub shows: Vec<Show>,
    pub users: Vec<User>,
    pub assets: Vec<Asset>,
}

pub type Db = Arc<RwLock<Store>>;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/show-management", post(create_show))
        .route("/api/show-management/pagination", get(show_pagination))
        .route(
            "/api/show-management/{id}",
            get(get_show).put(update_show).delete(delete_show),
        )
        .route("/api/show-management/{id}/profile-image", put(update_show_image))
        .route("/api/user-management", post(create_user))
        .route("/api/user-management/pagination", get(user_pagination))
        .route("/api/user-management/all-roles", get(all_roles))
        .route("/api/user-management/all-memberships", get(all_memberships))
        .route(
            "/api/user-management/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/image-asset-management/show-profile", post(upload_show_image))
        .route("/api/image-asset-management/user-profile", post(upload_user_image))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct PageQuery {
    pub limit: u32,
    pub page: u32,
}

fn paginate<T: Clone>(items: &[T], query: &PageQuery) -> PageDto<T> {
    let limit = query.limit.max(1);
    let page = query.page.max(1);
    let total = items.len() as u32;
    let total_pages = total.div_ceil(limit);
    let start = ((page - 1) * limit) as usize;
    let results = items.iter().skip(start).take(limit as usize).cloned().collect();
    PageDto {
        limit,
        page,
        total,
        total_pages,
        results,
    }
}

// ---------------------------------------------------------------------------
// Show handlers
// ---------------------------------------------------------------------------

async fn show_pagination(
    State(db): State<Db>,
    Query(query): Query<PageQuery>,
) -> Json<PageDto<Show>> {
    let store = db.read().await;
    Json(paginate(&store.shows, &query))
}

async fn create_show(
    State(db): State<Db>,
    Json(input): Json<CreateShow>,
) -> (StatusCode, Json<CreateResponse>) {
    let mut store = db.write().await;
    let moderators = resolve_moderators(&store.users, &input.moderator_ids);
    let id = Uuid::new_v4().to_string();
    store.shows.push(Show {
        id: id.clone(),
        name: input.name,
        description: input.description,
        moderators,
        profile_image: None,
    });
    log::debug!("created show {id}");
    (StatusCode::CREATED, Json(CreateResponse { id }))
}

async fn get_show(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Show>, StatusCode> {
    let store = db.read().await;
    store
        .shows
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_show(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateShow>,
) -> StatusCode {
    let mut store = db.write().await;
    let moderators = resolve_moderators(&store.users, &input.moderator_ids);
    let Some(show) = store.shows.iter_mut().find(|s| s.id == id) else {
        return StatusCode::NOT_FOUND;
    };
    show.name = input.name;
    show.description = input.description;
    show.moderators = moderators;
    StatusCode::NO_CONTENT
}

async fn update_show_image(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateShowImage>,
) -> StatusCode {
    let mut store = db.write().await;
    if !store.assets.iter().any(|a| a.id == input.profile_image_id) {
        return StatusCode::NOT_FOUND;
    }
    let Some(show) = store.shows.iter_mut().find(|s| s.id == id) else {
        return StatusCode::NOT_FOUND;
    };
    show.profile_image = Some(ImageAsset {
        id: input.profile_image_id.clone(),
        url: format!("/assets/{}", input.profile_image_id),
    });
    StatusCode::NO_CONTENT
}

async fn delete_show(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut store = db.write().await;
    match store.shows.iter().position(|s| s.id == id) {
        Some(index) => {
            store.shows.remove(index);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

fn resolve_moderators(users: &[User], ids: &[String]) -> Vec<Moderator> {
    ids.iter()
        .map(|id| Moderator {
            id: id.clone(),
            nickname: users
                .iter()
                .find(|u| &u.id == id)
                .map(|u| u.nickname.clone())
                .unwrap_or_default(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// User handlers
// ---------------------------------------------------------------------------

async fn user_pagination(
    State(db): State<Db>,
    Query(query): Query<PageQuery>,
) -> Json<PageDto<UserRow>> {
    let store = db.read().await;
    let rows: Vec<UserRow> = store.users.iter().map(User::row).collect();
    Json(paginate(&rows, &query))
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<CreateResponse>) {
    let id = Uuid::new_v4().to_string();
    db.write().await.users.push(User {
        id: id.clone(),
        firstname: input.firstname,
        lastname: input.lastname,
        nickname: input.nickname,
        prefer_nickname_over_name: input.prefer_nickname_over_name,
        abouth: input.abouth,
        email: input.email,
        password: input.password,
        profile_image_id: String::new(),
        is_active: true,
        external_id: None,
        role_history: input.role_history,
        membership_history: input.membership_history,
    });
    log::debug!("created user {id}");
    (StatusCode::CREATED, Json(CreateResponse { id }))
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<UserDetail>, StatusCode> {
    let store = db.read().await;
    store
        .users
        .iter()
        .find(|u| u.id == id)
        .map(|u| Json(u.detail()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> StatusCode {
    let mut store = db.write().await;
    let Some(user) = store.users.iter_mut().find(|u| u.id == id) else {
        return StatusCode::NOT_FOUND;
    };
    user.firstname = input.firstname;
    user.lastname = input.lastname;
    user.nickname = input.nickname;
    user.abouth = input.abouth;
    StatusCode::NO_CONTENT
}

async fn delete_user(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut store = db.write().await;
    match store.users.iter().position(|u| u.id == id) {
        Some(index) => {
            store.users.remove(index);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn all_roles() -> Json<AllRoles> {
    Json(AllRoles {
        roles: catalog(&[
            ("moderator", "Moderator"),
            ("technician", "Technician"),
            ("editor", "Editor"),
        ]),
    })
}

async fn all_memberships() -> Json<AllMemberships> {
    Json(AllMemberships {
        memberships: catalog(&[
            ("regular", "Regular member"),
            ("honorary", "Honorary member"),
            ("alumni", "Alumni"),
        ]),
    })
}

fn catalog(entries: &[(&str, &str)]) -> Vec<NamedEntry> {
    entries
        .iter()
        .map(|(id, name)| NamedEntry {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Image asset handlers
// ---------------------------------------------------------------------------

async fn upload_show_image(
    State(db): State<Db>,
    multipart: Multipart,
) -> Result<String, StatusCode> {
    store_image(db, "show-profile", "showId", multipart).await
}

async fn upload_user_image(
    State(db): State<Db>,
    multipart: Multipart,
) -> Result<String, StatusCode> {
    store_image(db, "user-profile", "userId", multipart).await
}

/// Reads the `image` file field and the owning-entity id field, stores the
/// asset, and returns its id as plain text.
async fn store_image(
    db: Db,
    kind: &str,
    owner_field: &str,
    mut multipart: Multipart,
) -> Result<String, StatusCode> {
    let mut owner_id = None;
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            file = Some((filename, content_type, bytes.to_vec()));
        } else if name == owner_field {
            owner_id = Some(field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?);
        }
    }
    let (Some(owner_id), Some((filename, content_type, bytes))) = (owner_id, file) else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    let id = Uuid::new_v4().to_string();
    log::debug!("stored {kind} asset {id} for {owner_id} ({} bytes)", bytes.len());
    db.write().await.assets.push(Asset {
        id: id.clone(),
        kind: kind.to_string(),
        owner_id,
        filename,
        content_type,
        bytes,
    });
    Ok(id)
}
