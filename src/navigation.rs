//! Drill-down navigation between the dashboard, the subject list and a
//! single subject.
//!
//! There is no back-stack: the state holds one page and, on the detail page,
//! the selected subject. The detail variant carries its subject, so a detail
//! page without one cannot be constructed.

use serde::Serialize;
use tracing::debug;

/// Pages that can be navigated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Dashboard,
    SubjectList,
    SubjectDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum NavigationState {
    #[default]
    Dashboard,
    SubjectList,
    SubjectDetail { subject: String },
}

impl NavigationState {
    pub fn page(&self) -> Page {
        match self {
            NavigationState::Dashboard => Page::Dashboard,
            NavigationState::SubjectList => Page::SubjectList,
            NavigationState::SubjectDetail { .. } => Page::SubjectDetail,
        }
    }

    pub fn selected_subject(&self) -> Option<&str> {
        match self {
            NavigationState::SubjectDetail { subject } => Some(subject.as_str()),
            _ => None,
        }
    }
}

/// Where following a breadcrumb leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum CrumbTarget {
    Dashboard,
    SubjectList,
    SubjectDetail { subject: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub target: CrumbTarget,
    /// The crumb of the page currently shown; rendered as plain text.
    pub active: bool,
}

pub const ROOT_LABEL: &str = "Overzicht";
pub const SUBJECT_LIST_LABEL: &str = "Alle Vakken";

/// Navigation state machine. Starts on the dashboard.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavigationState,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Breadcrumb root link; valid from every page and drops the selected subject.
    pub fn go_to_dashboard(&mut self) -> &NavigationState {
        self.transition(NavigationState::Dashboard)
    }

    /// "View all subjects" from the dashboard, or the breadcrumb back from a subject.
    pub fn view_all_subjects(&mut self) -> &NavigationState {
        self.transition(NavigationState::SubjectList)
    }

    /// Drill into one subject from the list or a dashboard quick link.
    pub fn open_subject(&mut self, subject: impl Into<String>) -> &NavigationState {
        self.transition(NavigationState::SubjectDetail {
            subject: subject.into(),
        })
    }

    /// Follows a crumb produced by [`Navigator::breadcrumbs`].
    pub fn follow(&mut self, crumb: &Breadcrumb) -> &NavigationState {
        match &crumb.target {
            CrumbTarget::Dashboard => self.go_to_dashboard(),
            CrumbTarget::SubjectList => self.view_all_subjects(),
            CrumbTarget::SubjectDetail { subject } => self.open_subject(subject.clone()),
        }
    }

    /// Trail from the root to the current page; the last crumb is active.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb {
            label: ROOT_LABEL.to_string(),
            target: CrumbTarget::Dashboard,
            active: self.state == NavigationState::Dashboard,
        }];

        match &self.state {
            NavigationState::Dashboard => {}
            NavigationState::SubjectList => crumbs.push(Breadcrumb {
                label: SUBJECT_LIST_LABEL.to_string(),
                target: CrumbTarget::SubjectList,
                active: true,
            }),
            NavigationState::SubjectDetail { subject } => {
                crumbs.push(Breadcrumb {
                    label: SUBJECT_LIST_LABEL.to_string(),
                    target: CrumbTarget::SubjectList,
                    active: false,
                });
                crumbs.push(Breadcrumb {
                    label: subject.clone(),
                    target: CrumbTarget::SubjectDetail {
                        subject: subject.clone(),
                    },
                    active: true,
                });
            }
        }

        crumbs
    }

    fn transition(&mut self, next: NavigationState) -> &NavigationState {
        debug!(from = ?self.state.page(), to = ?next.page(), "Navigation");
        self.state = next;
        &self.state
    }
}
