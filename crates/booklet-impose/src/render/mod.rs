//! PDF rendering modules for imposition
//!
//! This module handles all PDF-specific operations:
//! - Creating XObjects from source pages
//! - Deep copying PDF objects
//! - Reading page dimensions

mod xobject;

pub use xobject::{
    ObjectCache, PageBox, copy_object_deep, create_page_xobject, get_page_box, get_page_dimensions,
};
