pub(crate) mod auth_panel;
pub(crate) mod challenge_detail;
pub(crate) mod challenge_list;
pub(crate) mod comments;
pub(crate) mod filters_menu;
pub(crate) mod top_users;
