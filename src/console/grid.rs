//! List panel: paging, selection and action buttons.

use super::controller::Controller;
use crate::{
    client::UsersApi,
    users::{User, UserId},
};

pub const PAGE_SIZES: [usize; 3] = [5, 10, 25];
pub const COLUMNS: [&str; 5] = ["ID", "First Name", "Last Name", "Email", "Active"];

pub const CONFIRM_TITLE: &str = "Delete User";
pub const CONFIRM_MESSAGE: &str = "Are you sure you want to delete this user?";

/// Client-side pagination over the loaded list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: PAGE_SIZES[0],
        }
    }
}

impl Pager {
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` rows; an empty list still has one page.
    #[must_use]
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Accepts only the offered page sizes and resets to the first page.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if PAGE_SIZES.contains(&size) {
            self.page_size = size;
            self.page = 0;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self, total: usize) {
        self.clamp(total);
        if self.page + 1 < self.page_count(total) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self, total: usize) {
        self.clamp(total);
        self.page = self.page.saturating_sub(1);
    }

    /// Pulls a page index left behind by a shrinking list back to the last page.
    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.page_count(total) - 1);
    }

    /// Jumps to a zero-based page, clamped to the last one.
    pub fn go_to(&mut self, page: usize, total: usize) {
        self.page = page.min(self.page_count(total) - 1);
    }

    /// Rows visible on the current page, clamping a stale page index.
    #[must_use]
    pub fn slice<'a>(&self, rows: &'a [User]) -> &'a [User] {
        let page = self.page.min(self.page_count(rows.len()) - 1);
        let start = (page * self.page_size).min(rows.len());
        let end = (start + self.page_size).min(rows.len());
        &rows[start..end]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionButtons {
    pub new: bool,
    pub edit: bool,
    pub delete: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: &'static str,
    pub message: &'static str,
}

/// Everything the list panel needs to draw itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridView {
    pub rows: Vec<User>,
    pub selected: Option<UserId>,
    pub buttons: ActionButtons,
    pub dialog: Option<ConfirmDialog>,
    pub banner: Option<String>,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total: usize,
}

impl GridView {
    pub fn new<A: UsersApi>(controller: &Controller<A>, pager: &Pager) -> Self {
        let users = controller.users();
        let selected = controller.selected_user().map(|user| user.id);
        let page_count = pager.page_count(users.len());

        Self {
            rows: pager.slice(users).to_vec(),
            selected,
            buttons: ActionButtons {
                new: true,
                edit: selected.is_some(),
                delete: selected.is_some(),
            },
            dialog: controller.is_confirming_delete().then_some(ConfirmDialog {
                title: CONFIRM_TITLE,
                message: CONFIRM_MESSAGE,
            }),
            banner: controller.banner().map(str::to_string),
            page: pager.page().min(page_count - 1),
            page_count,
            page_size: pager.page_size(),
            total: users.len(),
        }
    }
}
