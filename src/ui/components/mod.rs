pub mod lesson_view;
pub mod outline_list;
pub mod progress_bar;
pub mod question_panel;
pub mod reader_view;
pub mod summary;
