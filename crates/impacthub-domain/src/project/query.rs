use std::cmp::Ordering;
use std::str::FromStr;

use super::Project;
use crate::shared::DomainError;

/// Impact-area value that disables the area filter
pub const ALL_AREAS: &str = "all";

/// Order of a project listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectSort {
    /// Newest first; projects without a creation time go last
    #[default]
    Recent,
    /// Most supporters first
    Supported,
    /// By title
    Alpha,
}

impl FromStr for ProjectSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" => Ok(ProjectSort::Recent),
            "supported" => Ok(ProjectSort::Supported),
            "alpha" => Ok(ProjectSort::Alpha),
            other => Err(DomainError::Validation(format!(
                "Unknown sort '{}', expected recent, supported or alpha",
                other
            ))),
        }
    }
}

/// Client-side search, area filter and ordering over a fetched project list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectQuery {
    search: String,
    area: Option<String>,
    sort: ProjectSort,
}

impl ProjectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring of the title
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_lowercase();
        self
    }

    /// Exact impact area; `all` or a blank value matches every area
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        let area = area.into().trim().to_string();
        self.area = (!area.is_empty() && area != ALL_AREAS).then_some(area);
        self
    }

    pub fn with_sort(mut self, sort: ProjectSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn sort(&self) -> ProjectSort {
        self.sort
    }

    /// Untitled projects never match, even with an empty search
    pub fn matches(&self, project: &Project) -> bool {
        if project.title.is_empty() {
            return false;
        }

        let title_match = project.title.to_lowercase().contains(&self.search);
        let area_match = self
            .area
            .as_deref()
            .map_or(true, |area| project.impact_area == area);

        title_match && area_match
    }

    /// Filter then order. Ties keep the backend's order.
    pub fn apply(&self, projects: Vec<Project>) -> Vec<Project> {
        let mut selected: Vec<Project> = projects.into_iter().filter(|p| self.matches(p)).collect();

        match self.sort {
            ProjectSort::Recent => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProjectSort::Supported => {
                selected.sort_by(|a, b| b.supporters_count.cmp(&a.supporters_count))
            }
            ProjectSort::Alpha => selected.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        }

        selected
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
