//! Post visibility rules.
//!
//! A post is visible when it is approved, when the viewer is a reviewer,
//! or when the viewer wrote it. Listings and single fetches share the
//! same [`VisibilityFilter`] so the two can never disagree.

use crate::db::{Role, User};

use super::post::{Post, PostStatus};

/// Who is looking at a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewer {
    /// No valid session.
    #[default]
    Anonymous,
    /// Authenticated user with their current role.
    User {
        /// User ID.
        id: i64,
        /// Role as currently stored, not as claimed by the token.
        role: Role,
    },
}

impl Viewer {
    /// Create an authenticated viewer.
    pub fn user(id: i64, role: Role) -> Self {
        Viewer::User { id, role }
    }

    /// User ID, if authenticated.
    pub fn id(&self) -> Option<i64> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User { id, .. } => Some(*id),
        }
    }

    /// Role, if authenticated.
    pub fn role(&self) -> Option<Role> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User { role, .. } => Some(*role),
        }
    }

    /// Whether the viewer may moderate posts.
    pub fn is_reviewer(&self) -> bool {
        self.role().is_some_and(|r| r.can_review())
    }

    /// The filter listings must apply for this viewer.
    pub fn filter(&self) -> VisibilityFilter {
        match *self {
            Viewer::User { role, .. } if role.can_review() => VisibilityFilter::Everything,
            Viewer::User { id, .. } => VisibilityFilter::ApprovedOrAuthoredBy(id),
            Viewer::Anonymous => VisibilityFilter::ApprovedOnly,
        }
    }

    /// Whether this viewer may see the given post.
    pub fn can_view(&self, post: &Post) -> bool {
        self.filter().allows(post.status, post.author_id)
    }
}

impl From<&User> for Viewer {
    fn from(user: &User) -> Self {
        Viewer::user(user.id, user.role)
    }
}

/// Row-level visibility predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityFilter {
    /// Reviewers see every post.
    Everything,
    /// Members see approved posts plus their own.
    ApprovedOrAuthoredBy(i64),
    /// Anonymous viewers see approved posts only.
    ApprovedOnly,
}

impl VisibilityFilter {
    /// Evaluate the predicate against a post's status and author.
    pub fn allows(&self, status: PostStatus, author_id: i64) -> bool {
        match self {
            VisibilityFilter::Everything => true,
            VisibilityFilter::ApprovedOrAuthoredBy(id) => status.is_approved() || author_id == *id,
            VisibilityFilter::ApprovedOnly => status.is_approved(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(author_id: i64, status: PostStatus) -> Post {
        Post {
            id: 1,
            board_id: 1,
            author_id,
            title: "Title".to_string(),
            content: "Body".to_string(),
            is_notice: false,
            status,
            views: 0,
            created_at: "2024-01-01 00:00:00".to_string(),
            updated_at: "2024-01-01 00:00:00".to_string(),
            author_name: None,
            board_name: None,
        }
    }

    #[test]
    fn test_pending_hidden_from_anonymous() {
        assert!(!Viewer::Anonymous.can_view(&post(1, PostStatus::Pending)));
    }

    #[test]
    fn test_pending_hidden_from_other_member() {
        let other = Viewer::user(2, Role::Member);
        assert!(!other.can_view(&post(1, PostStatus::Pending)));
    }

    #[test]
    fn test_pending_visible_to_author() {
        let author = Viewer::user(1, Role::Member);
        assert!(author.can_view(&post(1, PostStatus::Pending)));
    }

    #[test]
    fn test_pending_visible_to_reviewers() {
        assert!(Viewer::user(5, Role::Reviewer).can_view(&post(1, PostStatus::Pending)));
        assert!(Viewer::user(6, Role::Admin).can_view(&post(1, PostStatus::Pending)));
    }

    #[test]
    fn test_approved_visible_to_everyone() {
        let approved = post(1, PostStatus::Approved);
        assert!(Viewer::Anonymous.can_view(&approved));
        assert!(Viewer::user(2, Role::Member).can_view(&approved));
        assert!(Viewer::user(3, Role::Reviewer).can_view(&approved));
    }

    #[test]
    fn test_filter_per_viewer() {
        assert_eq!(Viewer::Anonymous.filter(), VisibilityFilter::ApprovedOnly);
        assert_eq!(
            Viewer::user(4, Role::Member).filter(),
            VisibilityFilter::ApprovedOrAuthoredBy(4)
        );
        assert_eq!(
            Viewer::user(4, Role::Reviewer).filter(),
            VisibilityFilter::Everything
        );
    }

    #[test]
    fn test_viewer_accessors() {
        assert_eq!(Viewer::Anonymous.id(), None);
        assert!(!Viewer::Anonymous.is_reviewer());

        let viewer = Viewer::user(3, Role::Admin);
        assert_eq!(viewer.id(), Some(3));
        assert_eq!(viewer.role(), Some(Role::Admin));
        assert!(viewer.is_reviewer());
    }
}
