pub(crate) mod admin_dashboard;
pub(crate) mod donation_page;
pub(crate) mod home_page;
pub(crate) mod news_detail_page;
pub(crate) mod profile_page;
pub(crate) mod tool_detail_page;
