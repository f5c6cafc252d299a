pub mod file_list;
pub mod status;
pub mod tag_cloud;
