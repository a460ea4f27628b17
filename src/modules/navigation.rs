// Pure folder navigation logic - no store access allowed.
// Path helpers and breadcrumb truncation that can be unit tested.

use crate::state::{QueryFolder, UNKNOWN_FOLDER};

/// Folders shown before the trail collapses into first / ... / last.
pub const MAX_VISIBLE_FOLDERS: usize = 2;

pub fn navigate_to_folder(path: &mut Vec<String>, folder_id: &str) {
    path.push(folder_id.to_string());
}

pub fn navigate_to_parent_folder(path: &mut Vec<String>) {
    path.pop();
}

pub fn navigate_to_root(path: &mut Vec<String>) {
    path.clear();
}

/// Truncates `path` so it ends at `index`. Out of range leaves it unchanged.
pub fn jump_to_path_index(path: &mut Vec<String>, index: usize) {
    path.truncate(index.saturating_add(1));
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Position in the navigation path.
    pub index: usize,
    pub id: String,
    pub name: String,
}

/// Resolves every path entry to a named breadcrumb.
pub fn breadcrumb_path(path: &[String], folders: &[QueryFolder]) -> Vec<Breadcrumb> {
    path.iter()
        .enumerate()
        .map(|(index, id)| {
            let name = folders
                .iter()
                .find(|f| &f.id == id)
                .map(|f| f.name.as_str())
                .filter(|name| !name.is_empty())
                .unwrap_or(UNKNOWN_FOLDER);

            Breadcrumb {
                index,
                id: id.clone(),
                name: name.to_string(),
            }
        })
        .collect()
}

/// Breadcrumbs split for display.
///
/// When truncated, `visible` holds the first and last entries and `hidden`
/// the ones behind the ellipsis, in path order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreadcrumbTrail {
    pub visible: Vec<Breadcrumb>,
    pub hidden: Vec<Breadcrumb>,
}

impl BreadcrumbTrail {
    pub fn is_truncated(&self) -> bool {
        !self.hidden.is_empty()
    }

    /// Rendered units: visible entries plus one for the ellipsis.
    pub fn units(&self) -> usize {
        self.visible.len() + usize::from(self.is_truncated())
    }
}

pub fn truncate_breadcrumbs(path: &[Breadcrumb]) -> BreadcrumbTrail {
    if path.len() <= MAX_VISIBLE_FOLDERS {
        return BreadcrumbTrail {
            visible: path.to_vec(),
            hidden: Vec::new(),
        };
    }

    let last = path.len() - 1;
    BreadcrumbTrail {
        visible: vec![path[0].clone(), path[last].clone()],
        hidden: path[1..last].to_vec(),
    }
}
