//! Spotify 代理端点，调用方在 `X-Spotify-Token` 中提供用户 access token

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use tracing::debug;

use crate::services::SpotifyClient;

use super::error_code::ErrorCode;
use super::helpers::{api_result, error_response};
use super::types::SpotifyTopQuery;

pub const SPOTIFY_TOKEN_HEADER: &str = "X-Spotify-Token";
const DEFAULT_TOP_LIMIT: u32 = 20;

fn spotify_token(req: &HttpRequest) -> Result<String, HttpResponse> {
    req.headers()
        .get(SPOTIFY_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .ok_or_else(|| {
            debug!("Spotify proxy request without {} header", SPOTIFY_TOKEN_HEADER);
            error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::SpotifyTokenMissing,
                "Missing X-Spotify-Token header",
            )
        })
}

pub async fn me(
    req: HttpRequest,
    spotify: web::Data<Arc<SpotifyClient>>,
) -> ActixResult<impl Responder> {
    let token = match spotify_token(&req) {
        Ok(t) => t,
        Err(resp) => return Ok(resp),
    };
    Ok(api_result(spotify.me(&token).await))
}

pub async fn top_artists(
    req: HttpRequest,
    query: web::Query<SpotifyTopQuery>,
    spotify: web::Data<Arc<SpotifyClient>>,
) -> ActixResult<impl Responder> {
    let token = match spotify_token(&req) {
        Ok(t) => t,
        Err(resp) => return Ok(resp),
    };
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    let time_range = query.time_range.unwrap_or_default();
    Ok(api_result(spotify.top_artists(&token, limit, time_range).await))
}

pub async fn top_tracks(
    req: HttpRequest,
    query: web::Query<SpotifyTopQuery>,
    spotify: web::Data<Arc<SpotifyClient>>,
) -> ActixResult<impl Responder> {
    let token = match spotify_token(&req) {
        Ok(t) => t,
        Err(resp) => return Ok(resp),
    };
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    let time_range = query.time_range.unwrap_or_default();
    Ok(api_result(spotify.top_tracks(&token, limit, time_range).await))
}
