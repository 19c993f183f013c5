//! Catalogue of every list resource: endpoint, normalisation, columns, and list behaviour.
//!
//! # Design
//! - One static `ResourceSpec` per endpoint; views and the CLI share them.
//! - Fallback chains are unified across resources (`name` always tries the same keys).
//! - Dynamic-column resources keep raw keys and derive columns from the fetched data.

use crate::format::{CellFormat, render};
use crate::listview::{ListSpec, SearchScope};
use crate::normalize::{FieldSpec, Normalizer, Source, dynamic_columns};
use crate::record::{CanonicalRecord, RawRecord};
use crate::sort::{SortKind, SortMode};

/// Route prefix for generic resource pages.
pub const DATA_ROUTE_PREFIX: &str = "/data";

/// Fixed table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    /// Canonical field rendered in the column.
    pub field: &'static str,
    /// Header text.
    pub label: &'static str,
    /// Cell formatting.
    pub format: CellFormat,
}

impl Column {
    const fn plain(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            format: CellFormat::Plain,
        }
    }

    const fn formatted(field: &'static str, label: &'static str, format: CellFormat) -> Self {
        Self {
            field,
            label,
            format,
        }
    }
}

/// Column layout of a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Columns {
    /// Known columns.
    Fixed(&'static [Column]),
    /// Columns taken from the record keys.
    Dynamic {
        /// Keys shown first, in order, when present.
        preferred: &'static [&'static str],
        /// Derived fields that must not become columns.
        hidden: &'static [&'static str],
    },
}

/// Column resolved for a concrete record set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnView {
    /// Field rendered in the column.
    pub field: String,
    /// Header text.
    pub label: String,
    /// Cell formatting.
    pub format: CellFormat,
}

/// Everything a list view needs to know about one resource.
#[derive(Debug, PartialEq)]
pub struct ResourceSpec {
    /// Resource this spec belongs to.
    pub resource: Resource,
    /// URL-safe identifier.
    pub slug: &'static str,
    /// Page heading.
    pub title: &'static str,
    /// Endpoint path passed to the API client.
    pub endpoint: &'static str,
    /// Raw-to-canonical mapping.
    pub normalizer: Normalizer,
    /// Table columns.
    pub columns: Columns,
    /// Search, sort, and paging defaults.
    pub list: ListSpec,
}

impl ResourceSpec {
    /// Normalise a fetched record set.
    #[must_use]
    pub fn normalize(&self, raw: &[RawRecord]) -> Vec<CanonicalRecord> {
        self.normalizer.normalize_all(raw)
    }

    /// Columns for the given records.
    #[must_use]
    pub fn columns_for(&self, records: &[CanonicalRecord]) -> Vec<ColumnView> {
        match self.columns {
            Columns::Fixed(columns) => columns
                .iter()
                .map(|column| ColumnView {
                    field: column.field.to_string(),
                    label: column.label.to_string(),
                    format: column.format,
                })
                .collect(),
            Columns::Dynamic { preferred, hidden } => {
                let keys = records
                    .iter()
                    .flat_map(|record| record.fields().map(|(key, _)| key));
                dynamic_columns(keys, preferred, hidden)
                    .into_iter()
                    .map(|field| ColumnView {
                        label: field.clone(),
                        field,
                        format: CellFormat::Plain,
                    })
                    .collect()
            }
        }
    }

    /// Render one cell.
    #[must_use]
    pub fn render_cell(record: &CanonicalRecord, column: &ColumnView) -> String {
        render(record.get(&column.field), column.format)
    }

    /// Keys of the sort menu, default first.
    pub fn sort_keys(&self) -> impl Iterator<Item = &'static str> {
        self.list.sort_modes.iter().map(|mode| mode.key)
    }
}

/// Every list resource the admin surfaces know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// `/api/departments` table.
    Departments,
    /// Legacy `/departments` directory.
    DepartmentDirectory,
    /// Provinces.
    Addresses,
    /// Education levels.
    EducationLevels,
    /// Main fields of study.
    MainStudies,
    /// Permission roles.
    Roles,
    /// Researcher accounts.
    Researchers,
    /// Extension requests.
    FormExtend,
    /// New-findings reports.
    FormNewFindings,
    /// Research ownership forms.
    FormResearchOwner,
    /// Research plans.
    FormResearchPlan,
    /// User accounts.
    Users,
}

impl Resource {
    /// All resources in navigation order.
    pub const ALL: [Self; 12] = [
        Self::Departments,
        Self::DepartmentDirectory,
        Self::Addresses,
        Self::EducationLevels,
        Self::MainStudies,
        Self::Roles,
        Self::Researchers,
        Self::FormExtend,
        Self::FormNewFindings,
        Self::FormResearchOwner,
        Self::FormResearchPlan,
        Self::Users,
    ];

    /// Static configuration.
    #[must_use]
    pub const fn spec(self) -> &'static ResourceSpec {
        match self {
            Self::Departments => &DEPARTMENTS,
            Self::DepartmentDirectory => &DEPARTMENT_DIRECTORY,
            Self::Addresses => &ADDRESSES,
            Self::EducationLevels => &EDUCATION_LEVELS,
            Self::MainStudies => &MAIN_STUDIES,
            Self::Roles => &ROLES,
            Self::Researchers => &RESEARCHERS,
            Self::FormExtend => &FORM_EXTEND,
            Self::FormNewFindings => &FORM_NEW_FINDINGS,
            Self::FormResearchOwner => &FORM_RESEARCH_OWNER,
            Self::FormResearchPlan => &FORM_RESEARCH_PLAN,
            Self::Users => &USERS,
        }
    }

    /// URL-safe identifier.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        self.spec().slug
    }

    /// Look up a resource by slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.slug() == slug.trim())
    }

    /// Front-end route of the resource page.
    #[must_use]
    pub fn route(self) -> String {
        match self {
            Self::DepartmentDirectory => "/departments".to_string(),
            Self::Users => "/users".to_string(),
            other => format!("{DATA_ROUTE_PREFIX}/{}", other.slug()),
        }
    }
}

const DEFAULT_PAGE_SIZE: usize = 5;
const WIDE_PAGE_SIZE: usize = 10;

const NAME_SOURCES: &[Source] = &[
    Source::Key("name"),
    Source::Key("name_th"),
    Source::Key("departmentName"),
    Source::Key("provinceName"),
    Source::Key("title"),
];
const TITLE_SOURCES: &[Source] = &[Source::Key("title"), Source::Key("name")];

const NAME_SORTS: &[SortMode] = &[
    SortMode::asc("name-asc", "Name (A-Z)", "name", SortKind::Text),
    SortMode::desc("name-desc", "Name (Z-A)", "name", SortKind::Text),
    SortMode::asc("id-asc", "ID (low-high)", "id", SortKind::Numeric),
    SortMode::desc("id-desc", "ID (high-low)", "id", SortKind::Numeric),
];
const TITLE_SORTS: &[SortMode] = &[
    SortMode::asc("title-asc", "Title (A-Z)", "title", SortKind::Text),
    SortMode::desc("title-desc", "Title (Z-A)", "title", SortKind::Text),
    SortMode::asc("id-asc", "ID (low-high)", "id", SortKind::Numeric),
    SortMode::desc("id-desc", "ID (high-low)", "id", SortKind::Numeric),
];
const ID_NAME_COLUMNS: &[Column] = &[Column::plain("id", "ID"), Column::plain("name", "Name")];
const ID_TITLE_COLUMNS: &[Column] = &[Column::plain("id", "ID"), Column::plain("title", "Title")];

const DEPARTMENTS_COLUMNS: &[Column] = &[
    Column::plain("id", "ID"),
    Column::plain("code", "Code"),
    Column::plain("name", "Name"),
];

const DEPARTMENT_DIRECTORY_COLUMNS: &[Column] = &[
    Column::plain("code", "Code"),
    Column::plain("name", "Name"),
];

const RESEARCHERS_COLUMNS: &[Column] = &[
    Column::plain("id", "ID"),
    Column::plain("fullname", "Name"),
    Column::plain("department", "Department"),
    Column::plain("email", "E-mail"),
    Column::formatted("card_id", "ID card", CellFormat::MaskedCard),
    Column::plain("role", "Role"),
    Column::plain("department_id", "Dept. ID"),
];

const FORM_EXTEND_COLUMNS: &[Column] = &[
    Column::plain("id", "ID"),
    Column::plain("code", "Code"),
    Column::plain("title", "Report title"),
    Column::plain("report_code", "Report code"),
    Column::formatted("start_date", "Start", CellFormat::ThaiDate),
    Column::formatted("end_date", "End", CellFormat::ThaiDate),
    Column::formatted("status", "Status", CellFormat::ExtendStatus),
    Column::plain("check_status", "Check"),
    Column::plain("create_by", "Created by"),
];

const FORM_NEW_FINDINGS_COLUMNS: &[Column] = &[
    Column::plain("id", "ID"),
    Column::plain("code", "Report code"),
    Column::plain("title_th", "Title (TH)"),
    Column::plain("title_en", "Title (EN)"),
    Column::plain("status", "Status"),
    Column::formatted("sla_at", "SLA", CellFormat::ThaiDate),
    Column::plain("sla_by", "SLA owner"),
];

const FORM_RESEARCH_PLAN_COLUMNS: &[Column] = &[
    Column::plain("id", "ID"),
    Column::plain("code", "Code"),
    Column::plain("fullname", "Researcher"),
    Column::plain("department", "Department"),
    Column::plain("email", "E-mail"),
    Column::plain("type_status", "Type"),
    Column::plain("period_months", "Months"),
    Column::formatted("start_date", "Start", CellFormat::ThaiDate),
    Column::formatted("budget", "Budget", CellFormat::Money),
    Column::plain("status", "Status"),
];

const USERS_COLUMNS: &[Column] = &[
    Column::plain("email", "E-mail"),
    Column::formatted("created_at", "Joined", CellFormat::ThaiDate),
];

static DEPARTMENTS: ResourceSpec = ResourceSpec {
    resource: Resource::Departments,
    slug: "departments",
    title: "Departments",
    endpoint: "/api/departments",
    normalizer: Normalizer {
        id_sources: &["id", "code"],
        fields: &[
            FieldSpec::new("code", &[Source::Key("code"), Source::Key("id")]),
            FieldSpec::new("name", NAME_SOURCES),
        ],
        keep_raw: false,
    },
    columns: Columns::Fixed(DEPARTMENTS_COLUMNS),
    list: ListSpec {
        search: SearchScope::Fields(&["name", "code"]),
        sort_modes: &[
            SortMode::asc("name-asc", "Name (A-Z)", "name", SortKind::Text),
            SortMode::desc("name-desc", "Name (Z-A)", "name", SortKind::Text),
            SortMode::asc("code-asc", "Code (A-Z)", "code", SortKind::Numeric),
            SortMode::desc("code-desc", "Code (Z-A)", "code", SortKind::Numeric),
        ],
        default_page_size: DEFAULT_PAGE_SIZE,
    },
};

static DEPARTMENT_DIRECTORY: ResourceSpec = ResourceSpec {
    resource: Resource::DepartmentDirectory,
    slug: "department-directory",
    title: "Department directory",
    endpoint: "/departments",
    normalizer: Normalizer {
        id_sources: &["id", "code"],
        fields: &[
            FieldSpec::new("code", &[Source::Key("code"), Source::Key("id")]),
            FieldSpec::new("name", NAME_SOURCES),
        ],
        keep_raw: false,
    },
    columns: Columns::Fixed(DEPARTMENT_DIRECTORY_COLUMNS),
    list: ListSpec {
        search: SearchScope::Fields(&["name", "code"]),
        sort_modes: &[
            SortMode::asc("name-asc", "Name (A-Z)", "name", SortKind::Text),
            SortMode::desc("name-desc", "Name (Z-A)", "name", SortKind::Text),
        ],
        default_page_size: DEFAULT_PAGE_SIZE,
    },
};

static ADDRESSES: ResourceSpec = ResourceSpec {
    resource: Resource::Addresses,
    slug: "addresses",
    title: "Provinces",
    endpoint: "/api/address",
    normalizer: Normalizer {
        id_sources: &["id", "code"],
        fields: &[FieldSpec::new("name", NAME_SOURCES)],
        keep_raw: false,
    },
    columns: Columns::Fixed(ID_NAME_COLUMNS),
    list: ListSpec {
        search: SearchScope::Fields(&["name", "id"]),
        sort_modes: NAME_SORTS,
        default_page_size: DEFAULT_PAGE_SIZE,
    },
};

static EDUCATION_LEVELS: ResourceSpec = ResourceSpec {
    resource: Resource::EducationLevels,
    slug: "education-levels",
    title: "Education levels",
    endpoint: "/api/educationlevels",
    normalizer: Normalizer {
        id_sources: &["id"],
        fields: &[FieldSpec::new("title", TITLE_SOURCES)],
        keep_raw: false,
    },
    columns: Columns::Fixed(ID_TITLE_COLUMNS),
    list: ListSpec {
        search: SearchScope::Fields(&["title", "id"]),
        sort_modes: TITLE_SORTS,
        default_page_size: DEFAULT_PAGE_SIZE,
    },
};

static MAIN_STUDIES: ResourceSpec = ResourceSpec {
    resource: Resource::MainStudies,
    slug: "main-studies",
    title: "Main studies",
    endpoint: "/api/mainstudies",
    normalizer: Normalizer {
        id_sources: &["id"],
        fields: &[FieldSpec::new("title", TITLE_SOURCES)],
        keep_raw: false,
    },
    columns: Columns::Fixed(ID_TITLE_COLUMNS),
    list: ListSpec {
        search: SearchScope::Fields(&["title", "id"]),
        sort_modes: TITLE_SORTS,
        default_page_size: DEFAULT_PAGE_SIZE,
    },
};

static ROLES: ResourceSpec = ResourceSpec {
    resource: Resource::Roles,
    slug: "roles",
    title: "Roles",
    endpoint: "/api/roles",
    normalizer: Normalizer {
        id_sources: &["id"],
        fields: &[FieldSpec::new("name", NAME_SOURCES)],
        keep_raw: false,
    },
    columns: Columns::Fixed(ID_NAME_COLUMNS),
    list: ListSpec {
        search: SearchScope::Fields(&["name", "id"]),
        sort_modes: NAME_SORTS,
        default_page_size: DEFAULT_PAGE_SIZE,
    },
};

static RESEARCHERS: ResourceSpec = ResourceSpec {
    resource: Resource::Researchers,
    slug: "researchers",
    title: "Researchers",
    endpoint: "/api/researcher",
    normalizer: Normalizer {
        id_sources: &["user_id", "id"],
        fields: &[
            FieldSpec::new("fullname", &[Source::Key("fullname"), Source::Key("name")]),
            FieldSpec::new("department", &[Source::Key("department_name")]),
            FieldSpec::new("email", &[Source::Key("email")]),
            FieldSpec::new("card_id", &[Source::Key("card_id")]),
            FieldSpec::new("role", &[Source::Key("default_role_id")]),
            FieldSpec::new("department_id", &[Source::Key("department_id")]),
        ],
        keep_raw: false,
    },
    columns: Columns::Fixed(RESEARCHERS_COLUMNS),
    list: ListSpec {
        search: SearchScope::Fields(&["fullname", "department", "email", "card_id", "role"]),
        sort_modes: &[
            SortMode::asc("name-asc", "Name (A-Z)", "fullname", SortKind::Text),
            SortMode::desc("name-desc", "Name (Z-A)", "fullname", SortKind::Text),
            SortMode::asc("dept-asc", "Department (A-Z)", "department", SortKind::Text),
            SortMode::desc("dept-desc", "Department (Z-A)", "department", SortKind::Text),
            SortMode::asc("id-asc", "ID (low-high)", "id", SortKind::Numeric),
            SortMode::desc("id-desc", "ID (high-low)", "id", SortKind::Numeric),
        ],
        default_page_size: DEFAULT_PAGE_SIZE,
    },
};

static FORM_EXTEND: ResourceSpec = ResourceSpec {
    resource: Resource::FormExtend,
    slug: "form-extend",
    title: "Extension requests",
    endpoint: "/api/form_extend",
    normalizer: Normalizer {
        id_sources: &["form_extend_id", "id"],
        fields: &[
            FieldSpec::new("code", &[Source::Key("extend_code")]),
            FieldSpec::new(
                "title",
                &[Source::Key("report_title_th"), Source::Key("title")],
            ),
            FieldSpec::new("report_code", &[Source::Key("report_code")]),
            FieldSpec::new("start_date", &[Source::Key("extend_start_date")]),
            FieldSpec::new("end_date", &[Source::Key("extend_end_date")]),
            FieldSpec::new("status", &[Source::Key("extend_status")]),
            FieldSpec::new("check_status", &[Source::Key("extend_check_status")]),
            FieldSpec::new("form_own_id", &[Source::Key("form_own_id")]),
            FieldSpec::new("form_new_id", &[Source::Key("form_new_id")]),
            FieldSpec::new("create_by", &[Source::Key("create_by")]),
        ],
        keep_raw: false,
    },
    columns: Columns::Fixed(FORM_EXTEND_COLUMNS),
    list: ListSpec {
        search: SearchScope::Fields(&["title", "code", "report_code", "id"]),
        sort_modes: &[
            SortMode::asc("code-asc", "Code (A-Z)", "code", SortKind::Text),
            SortMode::desc("code-desc", "Code (Z-A)", "code", SortKind::Text),
            SortMode::asc("title-asc", "Title (A-Z)", "title", SortKind::Text),
            SortMode::desc("title-desc", "Title (Z-A)", "title", SortKind::Text),
            SortMode::asc("start-asc", "Start (oldest)", "start_date", SortKind::Date),
            SortMode::desc("start-desc", "Start (newest)", "start_date", SortKind::Date),
            SortMode::asc("end-asc", "End (oldest)", "end_date", SortKind::Date),
            SortMode::desc("end-desc", "End (newest)", "end_date", SortKind::Date),
            SortMode::asc("status-asc", "Status (low-high)", "status", SortKind::Numeric),
            SortMode::desc("status-desc", "Status (high-low)", "status", SortKind::Numeric),
            SortMode::asc("id-asc", "ID (low-high)", "id", SortKind::Numeric),
            SortMode::desc("id-desc", "ID (high-low)", "id", SortKind::Numeric),
        ],
        default_page_size: DEFAULT_PAGE_SIZE,
    },
};

static FORM_NEW_FINDINGS: ResourceSpec = ResourceSpec {
    resource: Resource::FormNewFindings,
    slug: "form-new-findings",
    title: "New findings",
    endpoint: "/api/form_new_findings",
    normalizer: Normalizer {
        id_sources: &["form_new_id", "id"],
        fields: &[
            FieldSpec::new("code", &[Source::Key("report_code")]),
            FieldSpec::new("title_th", &[Source::Key("report_title_th")]),
            FieldSpec::new("title_en", &[Source::Key("report_title_en")]),
            FieldSpec::new("status", &[Source::Key("status")]).trimmed(),
            FieldSpec::new("status_id", &[Source::Key("form_status_id")]),
            FieldSpec::new("sla_at", &[Source::Key("sla_at")]),
            FieldSpec::new("sla_by", &[Source::Key("sla_by")]),
            FieldSpec::new("create_by", &[Source::Key("create_by")]),
        ],
        keep_raw: false,
    },
    columns: Columns::Fixed(FORM_NEW_FINDINGS_COLUMNS),
    list: ListSpec {
        search: SearchScope::Fields(&["code", "title_th", "title_en", "status", "id"]),
        sort_modes: &[
            SortMode::asc("code-asc", "Code (A-Z)", "code", SortKind::Text),
            SortMode::desc("code-desc", "Code (Z-A)", "code", SortKind::Text),
            SortMode::asc("title-asc", "Title (A-Z)", "title_th", SortKind::Text),
            SortMode::desc("title-desc", "Title (Z-A)", "title_th", SortKind::Text),
            SortMode::asc("status-asc", "Status (A-Z)", "status", SortKind::Text),
            SortMode::desc("status-desc", "Status (Z-A)", "status", SortKind::Text),
            SortMode::asc("sla-asc", "SLA (soonest)", "sla_at", SortKind::Date),
            SortMode::desc("sla-desc", "SLA (latest)", "sla_at", SortKind::Date),
            SortMode::asc("id-asc", "ID (low-high)", "id", SortKind::Numeric),
            SortMode::desc("id-desc", "ID (high-low)", "id", SortKind::Numeric),
        ],
        default_page_size: DEFAULT_PAGE_SIZE,
    },
};

/// Sort helpers derived during normalisation; never shown or searched.
const RESEARCH_OWNER_DERIVED: &[&str] = &["sort_code", "sort_created", "sort_approved"];

static FORM_RESEARCH_OWNER: ResourceSpec = ResourceSpec {
    resource: Resource::FormResearchOwner,
    slug: "form-research-owner",
    title: "Research ownership",
    endpoint: "/api/form_research_owner",
    normalizer: Normalizer {
        id_sources: &["form_own_id", "id"],
        fields: &[
            FieldSpec::new("sort_code", &[Source::Key("form_own_code"), Source::Key("code")]),
            FieldSpec::new("sort_created", &[Source::Key("form_own_created_at")]),
            FieldSpec::new("sort_approved", &[Source::Key("form_own_date_approve")]),
        ],
        keep_raw: true,
    },
    columns: Columns::Dynamic {
        preferred: &[
            "form_own_id",
            "form_own_code",
            "form_own_form_name",
            "form_own_status",
            "status",
            "is_ownership",
            "is_ownership_status",
            "form_own_date_approve",
            "form_own_checked_date",
            "form_own_created_at",
            "form_own_updated_at",
            "form_own_deleted_at",
        ],
        hidden: RESEARCH_OWNER_DERIVED,
    },
    list: ListSpec {
        search: SearchScope::AllFields {
            except: RESEARCH_OWNER_DERIVED,
        },
        sort_modes: &[
            SortMode::asc("code-asc", "Code (A-Z)", "sort_code", SortKind::Text),
            SortMode::desc("code-desc", "Code (Z-A)", "sort_code", SortKind::Text),
            SortMode::asc("id-asc", "ID (low-high)", "id", SortKind::Numeric),
            SortMode::desc("id-desc", "ID (high-low)", "id", SortKind::Numeric),
            SortMode::asc("created-asc", "Created (oldest)", "sort_created", SortKind::Date),
            SortMode::desc("created-desc", "Created (newest)", "sort_created", SortKind::Date),
            SortMode::asc("approved-asc", "Approved (oldest)", "sort_approved", SortKind::Date),
            SortMode::desc("approved-desc", "Approved (newest)", "sort_approved", SortKind::Date),
        ],
        default_page_size: WIDE_PAGE_SIZE,
    },
};

static FORM_RESEARCH_PLAN: ResourceSpec = ResourceSpec {
    resource: Resource::FormResearchPlan,
    slug: "form-research-plan",
    title: "Research plans",
    endpoint: "/api/form_research_plan",
    normalizer: Normalizer {
        id_sources: &["form_plan_id", "id"],
        fields: &[
            FieldSpec::new("code", &[Source::Key("form_plan_code")]),
            FieldSpec::new(
                "fullname",
                &[
                    Source::Key("fullname"),
                    Source::Joined(&["form_plan_fullname", "form_plan_lastname"]),
                ],
            )
            .trimmed(),
            FieldSpec::new("department", &[Source::Key("form_plan_department")]),
            FieldSpec::new("position", &[Source::Key("form_plan_position")]),
            FieldSpec::new("tel", &[Source::Key("form_plan_tel")]),
            FieldSpec::new("email", &[Source::Key("form_plan_email")]),
            FieldSpec::new("type_status", &[Source::Key("form_plan_type_status")]),
            FieldSpec::new("period_months", &[Source::Key("form_plan_period")]),
            FieldSpec::new("start_date", &[Source::Key("form_plan_start_date")]),
            FieldSpec::new("budget", &[Source::Key("form_plan_usage_value")]),
            FieldSpec::new("status", &[Source::Key("form_plan_status")]).trimmed(),
            FieldSpec::new("checked_date", &[Source::Key("form_plan_checked_date")]),
            FieldSpec::new("target", &[Source::Key("form_plan_target")]),
            FieldSpec::new("user_target", &[Source::Key("form_plan_user_target")]),
            FieldSpec::new("result", &[Source::Key("form_plan_result")]),
            FieldSpec::new("user_result", &[Source::Key("form_plan_user_result")]),
            FieldSpec::new("objectives", &[Source::Key("objective")]),
            FieldSpec::new("periods", &[Source::Key("period")]),
            FieldSpec::new("created_at", &[Source::Key("form_plan_created_at")]),
            FieldSpec::new("updated_at", &[Source::Key("form_plan_updated_at")]),
        ],
        keep_raw: false,
    },
    columns: Columns::Fixed(FORM_RESEARCH_PLAN_COLUMNS),
    list: ListSpec {
        search: SearchScope::Fields(&["code", "fullname", "department", "email", "status"]),
        sort_modes: &[
            SortMode::asc("name-asc", "Name (A-Z)", "fullname", SortKind::Text),
            SortMode::desc("name-desc", "Name (Z-A)", "fullname", SortKind::Text),
            SortMode::asc("code-asc", "Code (A-Z)", "code", SortKind::Text),
            SortMode::desc("code-desc", "Code (Z-A)", "code", SortKind::Text),
            SortMode::asc("budget-asc", "Budget (low-high)", "budget", SortKind::Numeric),
            SortMode::desc("budget-desc", "Budget (high-low)", "budget", SortKind::Numeric),
            SortMode::asc("start-asc", "Start (oldest)", "start_date", SortKind::Date),
            SortMode::desc("start-desc", "Start (newest)", "start_date", SortKind::Date),
        ],
        default_page_size: DEFAULT_PAGE_SIZE,
    },
};

static USERS: ResourceSpec = ResourceSpec {
    resource: Resource::Users,
    slug: "users",
    title: "Users",
    endpoint: "/users",
    normalizer: Normalizer {
        id_sources: &["id", "email"],
        fields: &[
            FieldSpec::new("email", &[Source::Key("email")]),
            FieldSpec::new(
                "created_at",
                &[Source::Key("createdAt"), Source::Key("created_at")],
            ),
            FieldSpec::new(
                "updated_at",
                &[Source::Key("updatedAt"), Source::Key("updated_at")],
            ),
        ],
        keep_raw: false,
    },
    columns: Columns::Fixed(USERS_COLUMNS),
    list: ListSpec {
        search: SearchScope::Fields(&["email"]),
        sort_modes: &[
            SortMode::desc("newest", "Newest first", "created_at", SortKind::Date),
            SortMode::asc("oldest", "Oldest first", "created_at", SortKind::Date),
            SortMode::asc("email", "E-mail (A-Z)", "email", SortKind::Text),
        ],
        default_page_size: WIDE_PAGE_SIZE,
    },
};
