use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct BookDoc {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub price: f64,
}

#[derive(ToSchema)]
pub struct BookInputDoc {
    pub title: String,
    pub author: String,
    pub price: f64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::books::list,
        crate::routes::books::create,
        crate::routes::books::get,
        crate::routes::books::update,
        crate::routes::books::delete,
    ),
    components(schemas(BookDoc, BookInputDoc)),
    tags(
        (name = "health"),
        (name = "books")
    )
)]
pub struct ApiDoc;
