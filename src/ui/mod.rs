pub mod order_dialog;
pub mod theme;
pub mod timeline_grid;
pub mod toolbar;
pub mod work_center_panel;
