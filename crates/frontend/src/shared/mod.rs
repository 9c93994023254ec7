pub mod api_utils;
pub mod components;
pub mod fallback;
pub mod fetch_cache;
pub mod filters;
pub mod icons;
pub mod list_utils;
pub mod pagination;
pub mod sorting;
