//! Data model for harvested articles
//!
//! This module defines the extracted [`Article`] record and the fixed
//! category enums ([`Topic`], [`TextType`]) that select listing pages.

mod article;
mod topic;

pub use article::Article;
pub use topic::{TextType, Topic};
