//! Board module for modboard.
//!
//! This module provides bulletin board functionality including:
//! - Boards (seeded reference data)
//! - Posts with a pending/approved moderation status
//! - Visibility rules shared by listings and single fetches

mod post;
mod post_repository;
mod repository;
pub mod service;
mod types;
mod visibility;

pub use post::{NewPost, Post, PostContentUpdate, PostStatus};
pub use post_repository::PostRepository;
pub use repository::BoardRepository;
pub use service::{BoardService, PaginatedResult, Pagination};
pub use types::{Board, NewBoard};
pub use visibility::{Viewer, VisibilityFilter};
