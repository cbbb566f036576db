mod fogsaa;
mod global;
mod local;
mod properties;
mod support;
