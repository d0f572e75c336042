use super::{FieldErrors, field, is_blank};
use crate::model::requirements::{
    PdfSignatureImageTemplate, PdfSignaturePage, VisiblePdfSignatureRequirement,
};

const MIN_SCALE: i32 = -100;

pub fn validate_image_template(
    template: &PdfSignatureImageTemplate,
    path: &str,
    errors: &mut FieldErrors,
) {
    if is_blank(&template.reference) {
        errors.add(field(path, "reference"), "template reference must be set");
    }
    if is_blank(&template.image) {
        errors.add(field(path, "image"), "image resource must be set");
    }
    if template.width <= 0 {
        errors.add(field(path, "width"), "width must be positive");
    }
    if template.height <= 0 {
        errors.add(field(path, "height"), "height must be positive");
    }
}

pub fn validate_sign_page(
    page: &PdfSignaturePage,
    templates: &[PdfSignatureImageTemplate],
    path: &str,
    errors: &mut FieldErrors,
) {
    if is_blank(&page.id) {
        errors.add(field(path, "id"), "sign page id must be set");
    }
    if page.page < 0 {
        errors.add(field(path, "page"), "page must not be negative");
    }
    if !templates
        .iter()
        .any(|template| template.reference == page.image_reference)
    {
        errors.add(
            field(path, "imageReference"),
            format!("unknown image template `{}`", page.image_reference),
        );
    }
    if page.rows == 0 {
        errors.add(field(path, "rows"), "at least one row is required");
    }
    if page.columns == 0 {
        errors.add(field(path, "columns"), "at least one column is required");
    }

    let placement = &page.image_placement;
    let placement_path = field(path, "imagePlacement");
    if placement.x_position < 0 {
        errors.add(field(&placement_path, "xPosition"), "must not be negative");
    }
    if placement.y_position < 0 {
        errors.add(field(&placement_path, "yPosition"), "must not be negative");
    }
    if placement.scale <= MIN_SCALE {
        errors.add(
            field(&placement_path, "scale"),
            format!("must be greater than {MIN_SCALE}"),
        );
    }
    if page.columns > 1 && placement.x_increment.is_none() {
        errors.add(
            field(&placement_path, "xIncrement"),
            "required when the page has more than one column",
        );
    }
    if page.rows > 1 && placement.y_increment.is_none() {
        errors.add(
            field(&placement_path, "yIncrement"),
            "required when the page has more than one row",
        );
    }
}

pub fn validate_visible_requirement(
    requirement: &VisiblePdfSignatureRequirement,
    templates: &[PdfSignatureImageTemplate],
    path: &str,
    errors: &mut FieldErrors,
) {
    let template = templates
        .iter()
        .find(|template| template.reference == requirement.template_reference);

    let Some(template) = template else {
        errors.add(
            field(path, "templateReference"),
            format!(
                "unknown image template `{}`",
                requirement.template_reference
            ),
        );
        return;
    };

    if requirement.page < 0 {
        errors.add(field(path, "page"), "page must not be negative");
    }
    if requirement.x_position < 0 {
        errors.add(field(path, "xPosition"), "must not be negative");
    }
    if requirement.y_position < 0 {
        errors.add(field(path, "yPosition"), "must not be negative");
    }
    if requirement.scale <= MIN_SCALE {
        errors.add(
            field(path, "scale"),
            format!("must be greater than {MIN_SCALE}"),
        );
    }
    if template.include_signer_name && requirement.signer_name.as_deref().is_none_or(is_blank) {
        errors.add(
            field(path, "signerName"),
            "template includes the signer name but none is given",
        );
    }
    for name in requirement.field_values.keys() {
        if !template.fields.contains_key(name) {
            errors.add(
                field(&field(path, "fieldValues"), name),
                format!("field is not defined by template `{}`", template.reference),
            );
        }
    }
}
