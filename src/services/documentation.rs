use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the league backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::teams::list_teams,
        crate::routes::teams::create_team,
        crate::routes::teams::get_team,
        crate::routes::teams::update_team,
        crate::routes::teams::delete_team,
        crate::routes::teams::register_win,
        crate::routes::teams::register_loss,
        crate::routes::games::list_games,
        crate::routes::games::create_game,
        crate::routes::games::get_game,
        crate::routes::games::register_result,
        crate::routes::games::delete_game,
        crate::routes::pokemon::get_pokemon,
        crate::routes::pokemon::api_test_page,
        crate::routes::pokemon::simulate_error,
        crate::routes::exceptions::file_error,
        crate::routes::exceptions::database_error,
        crate::routes::exceptions::api_error,
        crate::routes::pages::home,
        crate::routes::pages::about,
        crate::routes::pages::games_page,
        crate::routes::auth::login_page,
        crate::routes::auth::login_submit,
        crate::routes::auth::logout,
        crate::routes::auth::access_denied,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::team::CreateTeamRequest,
            crate::dto::team::UpdateTeamRequest,
            crate::dto::team::TeamResponse,
            crate::dto::game::CreateGameRequest,
            crate::dto::game::ResultRequest,
            crate::dto::game::GameResponse,
            crate::dto::pokemon::PokemonSummary,
            crate::dto::pages::AppInfo,
            crate::dto::pages::ApiTestPage,
            crate::dto::auth::LoginForm,
            crate::dto::auth::LoginPage,
            crate::dto::auth::AccessDeniedPage,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "teams", description = "Team management"),
        (name = "games", description = "Game scheduling and results"),
        (name = "pokemon", description = "Third-party API demo"),
        (name = "exceptions", description = "Error translator demos"),
        (name = "pages", description = "Informational pages"),
        (name = "auth", description = "Login flow"),
    )
)]
pub struct ApiDoc;
