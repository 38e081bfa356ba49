use crate::domain::a001_extra_field::repository::ExtraFieldRepository;

/// State shared by all request handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub fields: ExtraFieldRepository,
}
