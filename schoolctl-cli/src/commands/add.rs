//! Add a school
//!
//! Runs the form rules locally first, so nothing is sent until every field
//! passes. A failed image upload is reported and the school is submitted
//! without an image.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use schoolctl_core::{validate_form, SchoolPayload};

use crate::client::SchoolClient;

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// School name
    #[arg(long)]
    pub name: String,

    /// Street address (at least 10 characters)
    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub state: String,

    /// 10-digit contact number
    #[arg(long)]
    pub contact: String,

    /// Contact email address
    #[arg(long = "email")]
    pub email_id: String,

    /// Image file to upload with the school
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl AddArgs {
    fn payload(&self) -> SchoolPayload {
        SchoolPayload {
            name: Some(self.name.clone()),
            address: Some(self.address.clone()),
            city: Some(self.city.clone()),
            state: Some(self.state.clone()),
            contact: Some(self.contact.clone()),
            email_id: Some(self.email_id.clone()),
            image: None,
        }
    }
}

pub async fn run_add(args: AddArgs, endpoint: &str) -> Result<()> {
    let mut payload = args.payload();

    if let Err(errors) = validate_form(&payload) {
        for error in errors.fields() {
            eprintln!("  {}: {}", error.field, error.message);
        }
        bail!("{} field(s) failed validation", errors.fields().len());
    }

    let client = SchoolClient::new(endpoint)?;

    if let Some(path) = &args.image {
        match client.upload_image(path).await {
            Ok(image_path) => {
                tracing::debug!(path = %image_path, "image uploaded");
                payload.image = Some(image_path);
            }
            Err(e) => {
                tracing::warn!("Image upload failed, adding school without image: {:#}", e);
            }
        }
    }

    let id = client.create(&payload).await?;
    println!("✓ School added successfully (id: {})", id);

    Ok(())
}
