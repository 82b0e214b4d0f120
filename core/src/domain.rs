//! Domain model and DTO→domain mapping.
//!
//! # Design
//! Reads map wire DTOs into the value objects below with `from_dto`
//! constructors; writes go out as the DTOs in [`crate::types`] directly, so
//! the two directions are not inverses (write DTOs omit server-computed
//! fields such as ids and image URLs). Each mapping is total over its DTO
//! shape — a body that does not deserialize fails the whole operation in
//! `CmsClient`, never producing a partially populated object here.

use crate::types::{
    GetByIdUserDto, ImageAssetDto, MembershipDto, ModeratorDto, PaginationDto, PaginationUserDto,
    RoleDto, ShowDto, UserMembershipHistoryDto, UserRoleHistoryDto,
};

/// One page of a collection plus its pagination metadata.
///
/// `page_number` is 1-indexed. `total_pages == ceil(total_items / page_size)`
/// is server-guaranteed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_items: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Map a pagination envelope into a domain page, converting each row.
    pub fn from_dto<D>(dto: PaginationDto<D>, item: impl FnMut(D) -> T) -> Self {
        Page {
            items: dto.results.into_iter().map(item).collect(),
            page_number: dto.page,
            page_size: dto.limit,
            total_items: dto.total,
            total_pages: dto.total_pages,
        }
    }

    /// Convert the items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }

    /// Whether this page is the last one the server will hand out.
    ///
    /// `>=` rather than `==` so that an empty collection (page 1 of 0 total
    /// pages) also terminates pagination.
    pub fn is_last(&self) -> bool {
        self.page_number >= self.total_pages
    }
}

/// One selectable option of a multi-select field. Identity is `id`; two
/// items with equal ids are the same entity even if their labels differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableItem {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub id: String,
    pub url: String,
}

impl ImageAsset {
    fn from_dto(dto: ImageAssetDto) -> Self {
        ImageAsset {
            id: dto.id,
            url: dto.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moderator {
    pub id: String,
    pub nickname: String,
}

impl Moderator {
    fn from_dto(dto: ModeratorDto) -> Self {
        Moderator {
            id: dto.id,
            nickname: dto.nickname,
        }
    }

    /// Moderators are preselected in the show form under their nickname.
    pub fn to_select_item(&self) -> SelectableItem {
        SelectableItem {
            id: self.id.clone(),
            label: self.nickname.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    pub id: String,
    pub name: String,
    pub description: String,
    pub moderators: Vec<Moderator>,
    pub profile_image: Option<ImageAsset>,
}

impl Show {
    pub fn from_dto(dto: ShowDto) -> Self {
        Show {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            moderators: dto.moderators.into_iter().map(Moderator::from_dto).collect(),
            profile_image: dto.profile_image.map(ImageAsset::from_dto),
        }
    }

    pub fn to_select_item(&self) -> SelectableItem {
        SelectableItem {
            id: self.id.clone(),
            label: self.name.clone(),
        }
    }
}

/// The per-row user shape of the pagination listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub email: String,
    pub roles: Vec<String>,
    pub status: String,
}

impl UserSummary {
    pub fn from_dto(dto: PaginationUserDto) -> Self {
        UserSummary {
            id: dto.id,
            firstname: dto.firstname,
            lastname: dto.lastname,
            nickname: dto.nickname,
            email: dto.email,
            roles: dto.roles,
            status: dto.status,
        }
    }

    /// Users are offered in select fields under their nickname.
    pub fn to_select_item(&self) -> SelectableItem {
        SelectableItem {
            id: self.id.clone(),
            label: self.nickname.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHistoryEntry {
    pub role_id: String,
    pub function_start_date: String,
    pub function_end_date: Option<String>,
    pub description: Option<String>,
}

impl RoleHistoryEntry {
    fn from_dto(dto: UserRoleHistoryDto) -> Self {
        RoleHistoryEntry {
            role_id: dto.role_id,
            function_start_date: dto.function_start_date,
            function_end_date: dto.function_end_date,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipHistoryEntry {
    pub membership_id: String,
    pub change_date: String,
    pub description: Option<String>,
}

impl MembershipHistoryEntry {
    fn from_dto(dto: UserMembershipHistoryDto) -> Self {
        MembershipHistoryEntry {
            membership_id: dto.membership_id,
            change_date: dto.change_date,
            description: dto.description,
        }
    }
}

/// Full user detail as shown in the user form. The wire detail omits the id,
/// so the mapping threads in the id the caller requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub abouth: String,
    pub profile_image_id: String,
    pub is_active: bool,
    pub prefer_nickname_over_name: bool,
    pub external_id: Option<String>,
    pub email: Option<String>,
    pub role_history: Vec<RoleHistoryEntry>,
    pub membership_history: Vec<MembershipHistoryEntry>,
}

impl UserDetails {
    pub fn from_dto(id: String, dto: GetByIdUserDto) -> Self {
        UserDetails {
            id,
            firstname: dto.firstname,
            lastname: dto.lastname,
            nickname: dto.nickname,
            abouth: dto.abouth,
            profile_image_id: dto.profile_image_id,
            is_active: dto.is_active,
            prefer_nickname_over_name: dto.prefer_nickname_over_name,
            external_id: dto.external_id,
            email: dto.email,
            role_history: dto.role_history.into_iter().map(RoleHistoryEntry::from_dto).collect(),
            membership_history: dto
                .membership_history
                .into_iter()
                .map(MembershipHistoryEntry::from_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    pub name: String,
}

impl Role {
    pub fn from_dto(dto: RoleDto) -> Self {
        Role {
            id: dto.id,
            name: dto.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: String,
    pub name: String,
}

impl Membership {
    pub fn from_dto(dto: MembershipDto) -> Self {
        Membership {
            id: dto.id,
            name: dto.name,
        }
    }
}
