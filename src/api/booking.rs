//! Typed client of the remote laboratory/reservation service.
//!
//! Every call is independent: no retries, no cancellation, and no timeout
//! beyond the transport default.

pub mod models;
pub mod response;

use std::{ffi::OsStr, path::PathBuf, time::Duration};

use reqwest::{
    Client,
    Method,
    RequestBuilder,
    Url,
    multipart::{Form, Part},
};

use self::models::{
    CreateLaboratoryRequest,
    CreateMaterialRequest,
    CreateReservationRequest,
    FeatureStatus,
    Laboratory,
    LaboratoryFilters,
    Material,
    Reservation,
    UpdateLaboratoryRequest,
    UpdateMaterialRequest,
    UpdateReservationRequest,
};
use crate::{content::Post, prelude::*};

pub struct Api {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl Api {
    pub fn new(base_url: Url, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("labdesk")
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, base_url, token })
    }

    #[instrument(skip_all)]
    pub async fn get_laboratories(&self, filters: &LaboratoryFilters) -> Result<Vec<Laboratory>> {
        let mut url = self.endpoint(&["laboratories"])?;
        let query = serde_qs::to_string(filters).context("failed to encode the filters")?;
        if !query.is_empty() {
            url.set_query(Some(&query));
        }
        let laboratories: Vec<Laboratory> =
            response::read_data(self.request(Method::GET, url).send().await?).await?;
        info!(len = laboratories.len(), "fetched laboratories");
        Ok(laboratories)
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn get_laboratory(&self, id: &str) -> Result<Laboratory> {
        let url = self.endpoint(&["laboratories", id])?;
        response::read_data(self.request(Method::GET, url).send().await?)
            .await
            .with_context(|| format!("failed to fetch laboratory `{id}`"))
    }

    #[instrument(skip_all)]
    pub async fn create_laboratory(&self, request: CreateLaboratoryRequest) -> Result<Laboratory> {
        let mut request = request;
        let image = request.image.take();
        let form = build_form(request.into_fields(), image).await?;
        let url = self.endpoint(&["laboratories"])?;
        let laboratory: Laboratory =
            response::read_data(self.authorized(Method::POST, url)?.multipart(form).send().await?)
                .await
                .context("failed to create the laboratory")?;
        info!(id = %laboratory.id, "created");
        Ok(laboratory)
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn update_laboratory(
        &self,
        id: &str,
        request: UpdateLaboratoryRequest,
    ) -> Result<Laboratory> {
        let mut request = request;
        let image = request.image.take();
        let form = build_form(request.into_fields(), image).await?;
        let url = self.endpoint(&["laboratories", id])?;
        response::read_data(self.authorized(Method::PATCH, url)?.multipart(form).send().await?)
            .await
            .with_context(|| format!("failed to update laboratory `{id}`"))
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn delete_laboratory(&self, id: &str) -> Result {
        let url = self.endpoint(&["laboratories", id])?;
        response::check(self.authorized(Method::DELETE, url)?.send().await?)
            .await
            .with_context(|| format!("failed to delete laboratory `{id}`"))
    }

    #[instrument(skip_all, fields(laboratory_id = laboratory_id))]
    pub async fn get_materials(&self, laboratory_id: &str) -> Result<Vec<Material>> {
        let url = self.endpoint(&["laboratories", laboratory_id, "materials"])?;
        let materials: Vec<Material> =
            response::read_data(self.request(Method::GET, url).send().await?).await?;
        info!(len = materials.len(), "fetched materials");
        Ok(materials)
    }

    #[instrument(skip_all, fields(laboratory_id = laboratory_id, id = id))]
    pub async fn get_material(&self, laboratory_id: &str, id: &str) -> Result<Material> {
        let url = self.endpoint(&["laboratories", laboratory_id, "materials", id])?;
        response::read_data(self.request(Method::GET, url).send().await?)
            .await
            .with_context(|| format!("failed to fetch material `{id}`"))
    }

    #[instrument(skip_all, fields(laboratory_id = laboratory_id))]
    pub async fn create_material(
        &self,
        laboratory_id: &str,
        request: CreateMaterialRequest,
    ) -> Result<Material> {
        let mut request = request;
        let image = request.image.take();
        let form = build_form(request.into_fields(laboratory_id), image).await?;
        let url = self.endpoint(&["laboratories", laboratory_id, "materials"])?;
        let material: Material =
            response::read_data(self.authorized(Method::POST, url)?.multipart(form).send().await?)
                .await
                .context("failed to create the material")?;
        info!(id = %material.id, "created");
        Ok(material)
    }

    #[instrument(skip_all, fields(laboratory_id = laboratory_id, id = id))]
    pub async fn update_material(
        &self,
        laboratory_id: &str,
        id: &str,
        request: UpdateMaterialRequest,
    ) -> Result<Material> {
        let mut request = request;
        let image = request.image.take();
        let form = build_form(request.into_fields(), image).await?;
        let url = self.endpoint(&["laboratories", laboratory_id, "materials", id])?;
        response::read_data(self.authorized(Method::PATCH, url)?.multipart(form).send().await?)
            .await
            .with_context(|| format!("failed to update material `{id}`"))
    }

    #[instrument(skip_all, fields(laboratory_id = laboratory_id, id = id))]
    pub async fn delete_material(&self, laboratory_id: &str, id: &str) -> Result {
        let url = self.endpoint(&["laboratories", laboratory_id, "materials", id])?;
        response::check(self.authorized(Method::DELETE, url)?.send().await?)
            .await
            .with_context(|| format!("failed to delete material `{id}`"))
    }

    #[instrument(skip_all, fields(laboratory_id = laboratory_id))]
    pub async fn create_reservation(
        &self,
        laboratory_id: &str,
        request: &CreateReservationRequest,
    ) -> Result<Reservation> {
        let url = self.endpoint(&["laboratories", laboratory_id, "reservations"])?;
        let reservation: Reservation =
            response::read_data(self.request(Method::POST, url).json(request).send().await?)
                .await
                .context("failed to create the reservation")?;
        info!(id = %reservation.id, "created");
        Ok(reservation)
    }

    #[instrument(skip_all, fields(laboratory_id = laboratory_id))]
    pub async fn get_reservations(&self, laboratory_id: &str) -> Result<Vec<Reservation>> {
        let url = self.endpoint(&["laboratories", laboratory_id, "reservations"])?;
        let reservations: Vec<Reservation> =
            response::read_data(self.request(Method::GET, url).send().await?).await?;
        info!(len = reservations.len(), "fetched reservations");
        Ok(reservations)
    }

    #[instrument(skip_all)]
    pub async fn get_all_reservations(&self) -> Result<Vec<Reservation>> {
        let url = self.endpoint(&["laboratories", "reservations"])?;
        let reservations: Vec<Reservation> =
            response::read_data(self.request(Method::GET, url).send().await?).await?;
        info!(len = reservations.len(), "fetched reservations");
        Ok(reservations)
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn get_reservation(&self, id: &str) -> Result<Reservation> {
        let url = self.endpoint(&["laboratories", "reservations", id])?;
        response::read_data(self.request(Method::GET, url).send().await?)
            .await
            .with_context(|| format!("failed to fetch reservation `{id}`"))
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn update_reservation(
        &self,
        id: &str,
        request: &UpdateReservationRequest,
    ) -> Result<Reservation> {
        let url = self.endpoint(&["laboratories", "reservations", id])?;
        response::read_data(self.authorized(Method::PATCH, url)?.json(request).send().await?)
            .await
            .with_context(|| format!("failed to update reservation `{id}`"))
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn delete_reservation(&self, id: &str) -> Result {
        let url = self.endpoint(&["laboratories", "reservations", id])?;
        response::check(self.authorized(Method::DELETE, url)?.send().await?)
            .await
            .with_context(|| format!("failed to delete reservation `{id}`"))
    }

    #[instrument(skip_all)]
    pub async fn get_feature_status(&self) -> Result<FeatureStatus> {
        let url = self.endpoint(&["laboratories", "feature-status"])?;
        response::read(self.request(Method::GET, url).send().await?)
            .await
            .context("failed to fetch the feature status")
    }

    #[instrument(skip_all)]
    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        let url = self.endpoint(&["posts"])?;
        let posts: Vec<Post> =
            response::read_data(self.request(Method::GET, url).send().await?).await?;
        info!(len = posts.len(), "fetched posts");
        Ok(posts)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut().map_err(|()| anyhow!("invalid base URL"))?.extend(segments);
        Ok(url)
    }

    /// The token, when present, is forwarded on every request.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Mutating admin calls refuse to go out without a token at all.
    fn authorized(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        ensure!(
            self.token.is_some(),
            "authentication required: provide `--token` or set `LABDESK_TOKEN`",
        );
        Ok(self.request(method, url))
    }
}

/// Assemble the multipart form: the optional `image` file part first, then
/// one text part per DTO field.
async fn build_form(fields: Vec<(&'static str, String)>, image: Option<PathBuf>) -> Result<Form> {
    let mut form = Form::new();
    if let Some(path) = image {
        let file_name = path
            .file_name()
            .and_then(OsStr::to_str)
            .with_context(|| format!("invalid image file name in `{}`", path.display()))?
            .to_owned();
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        form = form.part("image", Part::bytes(bytes).file_name(file_name));
    }
    for (key, value) in fields {
        form = form.text(key, value);
    }
    Ok(form)
}
