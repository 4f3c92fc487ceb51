//! Resource definitions for every portfolio entity.
//!
//! Table and column names must match `db/migrations`.

use crate::resource::ColumnKind::{Boolean, Date, Email, Integer, Text, TextList, Url};
use crate::resource::{ColumnSpec as C, ReadAccess, ResourceDef};

pub static PORTFOLIO: ResourceDef = ResourceDef {
    entity: "Portfolio",
    table: "portfolio",
    path: "/portfolio",
    columns: &[
        C::required("name", Text),
        C::required("title", Text),
        C::optional("tagline", Text),
        C::optional("bio", Text),
        C::optional("email", Email),
        C::optional("phone", Text),
        C::optional("location", Text),
        C::optional("avatar_url", Url),
        C::optional("resume_url", Url),
        C::optional("github_url", Url),
        C::optional("linkedin_url", Url),
        C::optional("twitter_url", Url),
    ],
    order_by: "updated_at",
    read_access: ReadAccess::Public,
};

pub static EDUCATION: ResourceDef = ResourceDef {
    entity: "Education",
    table: "education",
    path: "/education",
    columns: &[
        C::required("institution", Text),
        C::required("degree", Text),
        C::optional("field_of_study", Text),
        C::optional("location", Text),
        C::required("start_date", Date),
        C::optional("end_date", Date),
        C::optional("grade", Text),
        C::optional("description", Text),
    ],
    order_by: "start_date",
    read_access: ReadAccess::Public,
};

pub static EXPERIENCE: ResourceDef = ResourceDef {
    entity: "Experience",
    table: "experience",
    path: "/experience",
    columns: &[
        C::required("company", Text),
        C::required("position", Text),
        C::optional("employment_type", Text),
        C::optional("location", Text),
        C::required("start_date", Date),
        C::optional("end_date", Date),
        C::optional("is_current", Boolean),
        C::optional("description", Text),
        C::optional("highlights", TextList),
        C::optional("tech_stack", TextList),
    ],
    order_by: "start_date",
    read_access: ReadAccess::Public,
};

pub static PROJECTS: ResourceDef = ResourceDef {
    entity: "Project",
    table: "projects",
    path: "/projects",
    columns: &[
        C::required("title", Text),
        C::required("description", Text),
        C::optional("long_description", Text),
        C::optional("tech_stack", TextList),
        C::optional("highlights", TextList),
        C::optional("github_url", Url),
        C::optional("live_url", Url),
        C::optional("image_url", Url),
        C::optional("featured", Boolean),
        C::optional("start_date", Date),
        C::optional("end_date", Date),
    ],
    order_by: "created_at",
    read_access: ReadAccess::Public,
};

pub static SKILLS: ResourceDef = ResourceDef {
    entity: "Skill",
    table: "skills",
    path: "/skills",
    columns: &[
        C::required("name", Text),
        C::required("category", Text),
        C::optional("proficiency", Integer { min: 0, max: 100 }),
        C::optional("icon", Text),
    ],
    order_by: "created_at",
    read_access: ReadAccess::Public,
};

pub static CERTIFICATIONS: ResourceDef = ResourceDef {
    entity: "Certification",
    table: "certifications",
    path: "/certifications",
    columns: &[
        C::required("name", Text),
        C::required("issuer", Text),
        C::required("issue_date", Date),
        C::optional("expiry_date", Date),
        C::optional("credential_id", Text),
        C::optional("credential_url", Url),
        C::optional("description", Text),
    ],
    order_by: "issue_date",
    read_access: ReadAccess::Public,
};

pub static ACHIEVEMENTS: ResourceDef = ResourceDef {
    entity: "Achievement",
    table: "achievements",
    path: "/achievements",
    columns: &[
        C::required("title", Text),
        C::optional("description", Text),
        C::optional("category", Text),
        C::optional("issuer", Text),
        C::required("date", Date),
    ],
    order_by: "date",
    read_access: ReadAccess::Public,
};

pub static HACKATHONS: ResourceDef = ResourceDef {
    entity: "Hackathon",
    table: "hackathons",
    path: "/hackathons",
    columns: &[
        C::required("name", Text),
        C::optional("organizer", Text),
        C::required("date", Date),
        C::optional("location", Text),
        C::optional("result", Text),
        C::optional("project_name", Text),
        C::optional("description", Text),
        C::optional("tech_stack", TextList),
        C::optional("project_url", Url),
    ],
    order_by: "date",
    read_access: ReadAccess::Public,
};

pub static RESEARCH: ResourceDef = ResourceDef {
    entity: "Research",
    table: "research",
    path: "/research",
    columns: &[
        C::required("title", Text),
        C::optional("authors", TextList),
        C::optional("publication", Text),
        C::optional("published_date", Date),
        C::optional("abstract", Text),
        C::optional("url", Url),
        C::optional("status", Text),
    ],
    order_by: "published_date",
    read_access: ReadAccess::Public,
};

pub static EXTRACURRICULAR: ResourceDef = ResourceDef {
    entity: "Extracurricular",
    table: "extracurricular",
    path: "/extracurricular",
    columns: &[
        C::required("activity", Text),
        C::optional("organization", Text),
        C::optional("role", Text),
        C::optional("start_date", Date),
        C::optional("end_date", Date),
        C::optional("description", Text),
        C::optional("contributions", TextList),
    ],
    order_by: "start_date",
    read_access: ReadAccess::Public,
};

pub static TESTIMONIALS: ResourceDef = ResourceDef {
    entity: "Testimonial",
    table: "testimonials",
    path: "/testimonials",
    columns: &[
        C::required("name", Text),
        C::optional("position", Text),
        C::optional("company", Text),
        C::required("content", Text),
        C::optional("rating", Integer { min: 1, max: 5 }),
        C::optional("avatar_url", Url),
    ],
    order_by: "created_at",
    read_access: ReadAccess::Public,
};

/// Contact messages: only the read/replied flags are admin-editable.
/// Rows are created by the public contact form, see [`crate::contact`].
pub static CONTACT_MESSAGES: ResourceDef = ResourceDef {
    entity: "Contact message",
    table: "contact_messages",
    path: "/contact",
    columns: &[
        C::required("read", Boolean),
        C::required("replied", Boolean),
    ],
    order_by: "created_at",
    read_access: ReadAccess::Admin,
};

/// Every resource, in mount order.
pub static RESOURCES: [&ResourceDef; 12] = [
    &PORTFOLIO,
    &EDUCATION,
    &EXPERIENCE,
    &PROJECTS,
    &SKILLS,
    &CERTIFICATIONS,
    &ACHIEVEMENTS,
    &HACKATHONS,
    &RESEARCH,
    &EXTRACURRICULAR,
    &TESTIMONIALS,
    &CONTACT_MESSAGES,
];
