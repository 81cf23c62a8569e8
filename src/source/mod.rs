pub mod flickr;

pub use flickr::FlickrSource;
