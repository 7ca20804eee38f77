use actix_web::{web, HttpResponse, Result};
use tracing::{error, info};
use uuid::Uuid;

use crate::database::connection::DbPool;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::project::{CreateProject, Project, ProjectError, UpdateProject};
use crate::requests::project::{CreateProjectRequest, UpdateProjectRequest};
use crate::utils::helpers::ApiResponse;

pub async fn create(
    pool: web::Data<DbPool>,
    request: web::Json<CreateProjectRequest>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    info!("Creating project for user: {}", user.user_id);

    let create_project = CreateProject {
        title: request.title.clone(),
        description: request.description.clone(),
        image_url: request.image_url.clone(),
    };

    match Project::create(&pool, create_project).await {
        Ok(project) => {
            info!("Successfully created project with ID: {}", project.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(project)))
        }
        Err(ProjectError::Database(e)) => {
            error!("Database error creating project: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to create project".to_string(),
                )),
            )
        }
        Err(e) => {
            error!("Error creating project: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())))
        }
    }
}

pub async fn get_project(pool: web::Data<DbPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let project_id = path.into_inner();

    match Project::find_by_id(&pool, project_id).await {
        Ok(Some(project)) => Ok(HttpResponse::Ok().json(ApiResponse::success(project))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(
            "Project not found".to_string(),
        ))),
        Err(ProjectError::Database(e)) => {
            error!("Database error getting project: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to retrieve project".to_string(),
                )),
            )
        }
        Err(e) => {
            error!("Error getting project: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())))
        }
    }
}

pub async fn all(pool: web::Data<DbPool>) -> Result<HttpResponse> {
    match Project::find_all(&pool).await {
        Ok(projects) => Ok(HttpResponse::Ok().json(ApiResponse::success(projects))),
        Err(ProjectError::Database(e)) => {
            error!("Database error getting all projects: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to retrieve projects".to_string(),
                )),
            )
        }
        Err(e) => {
            error!("Error getting all projects: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())))
        }
    }
}

pub async fn update(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateProjectRequest>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let project_id = path.into_inner();
    info!("Updating project {} for user: {}", project_id, user.user_id);

    let update_data = UpdateProject {
        title: request.title.clone(),
        description: request.description.clone(),
        image_url: request.image_url.clone(),
    };

    match Project::update(&pool, project_id, update_data).await {
        Ok(Some(project)) => Ok(HttpResponse::Ok().json(ApiResponse::success(project))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(
            "Project not found".to_string(),
        ))),
        Err(ProjectError::NotFound { id }) => Ok(HttpResponse::NotFound().json(
            ApiResponse::<()>::error(format!("Project {} not found", id)),
        )),
        Err(ProjectError::NoUpdateFields) => Ok(HttpResponse::BadRequest().json(
            ApiResponse::<()>::error("No fields provided for update".to_string()),
        )),
        Err(ProjectError::Database(e)) => {
            error!("Database error updating project: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to update project".to_string(),
                )),
            )
        }
    }
}

pub async fn delete(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let project_id = path.into_inner();

    if !user.is_admin() {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::<()>::error("Access denied".to_string())));
    }

    info!("Deleting project {} for user: {}", project_id, user.user_id);

    match Project::delete(&pool, project_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success(()))),
        Err(ProjectError::NotFound { id }) => Ok(HttpResponse::NotFound().json(
            ApiResponse::<()>::error(format!("Project {} not found", id)),
        )),
        Err(e) => {
            error!("Error deleting project: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                    "Failed to delete project".to_string(),
                )),
            )
        }
    }
}
