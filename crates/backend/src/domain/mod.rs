pub mod a001_extra_field;
