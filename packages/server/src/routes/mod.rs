use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::UploadConfig;
use crate::handlers::asset::upload_body_limit;
use crate::handlers::audio::*;
use crate::handlers::health::*;
use crate::handlers::score::*;
use crate::handlers::sprite::*;
use crate::state::AppState;

pub fn api_routes(upload: &UploadConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health))
        .routes(routes!(ping))
        .merge(upload_routes(upload))
        .merge(sprite_routes())
        .merge(audio_routes())
        .merge(score_routes())
}

fn upload_routes(upload: &UploadConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(upload_sprites))
        .routes(routes!(upload_audios))
        .layer(upload_body_limit(upload))
}

fn sprite_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_sprites))
        .routes(routes!(update_sprite, delete_sprite))
}

fn audio_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_audios))
        .routes(routes!(update_audio, delete_audio))
}

fn score_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(upload_scores))
        .routes(routes!(list_scores))
        .routes(routes!(update_score, delete_score))
}
