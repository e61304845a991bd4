pub(crate) mod add_tool_form;
pub(crate) mod ads_form;
pub(crate) mod confirm_modal;
pub(crate) mod image_picker;
pub(crate) mod news_form;
pub(crate) mod notification_banner;
