pub mod bar;
pub mod selection;
