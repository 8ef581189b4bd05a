//! The closed set of widgets shipped with the client

use super::render;
use super::spec::{
    Activation, FieldDefault, FieldKind, FieldSpec, ImageRefresh, Presence, WidgetKind, WidgetSpec,
};

const fn fetch(render: super::spec::RenderFn) -> WidgetKind {
    WidgetKind::Fetch { render }
}

pub static BUILTIN_WIDGETS: &[WidgetSpec] = &[
    WidgetSpec {
        slug: "ip-lookup",
        path: "/api/ip",
        fields: &[],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("Check My IP"),
        kind: fetch(render::json),
    },
    WidgetSpec {
        slug: "url-shortener",
        path: "/api/shorten",
        fields: &[FieldSpec {
            presence: Presence::Required,
            ..FieldSpec::text("url", "Paste URL", "https://example.com/very/long/link")
        }],
        fixed_params: &[],
        activation: Activation::Manual,
        trigger: Some("Shorten"),
        kind: fetch(render::short_link),
    },
    WidgetSpec {
        slug: "qr-generator",
        path: "/api/qr",
        fields: &[FieldSpec::text("text", "Text", "https://example.com")],
        fixed_params: &[],
        activation: Activation::Manual,
        trigger: None,
        kind: WidgetKind::Image {
            refresh: ImageRefresh::Live,
            alt: "QR",
        },
    },
    WidgetSpec {
        slug: "exchange-rates",
        path: "/api/exchange",
        fields: &[FieldSpec::text("base", "Base", "USD")],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("Get Rates"),
        kind: fetch(render::json),
    },
    WidgetSpec {
        slug: "currency-converter",
        path: "/api/convert",
        fields: &[
            FieldSpec::text("from", "From", "USD"),
            FieldSpec::text("to", "To", "EUR"),
            FieldSpec::number("amount", "Amount", FieldDefault::Text("100")),
        ],
        fixed_params: &[],
        activation: Activation::Manual,
        trigger: Some("Convert"),
        kind: fetch(render::conversion),
    },
    WidgetSpec {
        slug: "weather",
        path: "/api/weather",
        fields: &[FieldSpec::text("city", "Enter city", "London")],
        fixed_params: &[],
        activation: Activation::Manual,
        trigger: Some("Get Weather"),
        kind: fetch(render::weather),
    },
    WidgetSpec {
        slug: "timezone",
        path: "/api/timezone",
        fields: &[FieldSpec::text("tz", "Timezone (e.g., Europe/London)", "Etc/UTC")],
        fixed_params: &[],
        activation: Activation::Manual,
        trigger: Some("Get Time"),
        kind: fetch(render::json),
    },
    WidgetSpec {
        slug: "holidays",
        path: "/api/holidays",
        fields: &[
            FieldSpec::text("country", "Country", "US"),
            FieldSpec::number("year", "Year", FieldDefault::CurrentYear),
        ],
        fixed_params: &[],
        activation: Activation::Manual,
        trigger: Some("Get Holidays"),
        kind: fetch(render::json),
    },
    WidgetSpec {
        slug: "random-joke",
        path: "/api/joke",
        fields: &[],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("New Joke"),
        kind: fetch(render::joke),
    },
    WidgetSpec {
        slug: "random-quote",
        path: "/api/quote",
        fields: &[],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("New Quote"),
        kind: fetch(render::quote),
    },
    WidgetSpec {
        slug: "cat-image",
        path: "/api/cat",
        fields: &[],
        fixed_params: &[],
        activation: Activation::Manual,
        trigger: Some("New Cat"),
        kind: WidgetKind::Image {
            refresh: ImageRefresh::CacheBust,
            alt: "Cat",
        },
    },
    WidgetSpec {
        slug: "dog-image",
        path: "/api/dog",
        fields: &[],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("New Dog"),
        kind: fetch(render::dog),
    },
    WidgetSpec {
        slug: "uuid",
        path: "/api/uuid",
        fields: &[],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("Generate"),
        kind: fetch(render::uuid),
    },
    WidgetSpec {
        slug: "lorem-ipsum",
        path: "/api/lorem",
        fields: &[FieldSpec::number("paragraphs", "Paragraphs", FieldDefault::Text("2"))],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("Generate"),
        kind: fetch(render::lorem),
    },
    WidgetSpec {
        slug: "email-validator",
        path: "/api/validate-email",
        fields: &[FieldSpec::text("email", "Email", "name@example.com")],
        fixed_params: &[],
        activation: Activation::Manual,
        trigger: Some("Validate"),
        kind: fetch(render::json),
    },
    WidgetSpec {
        slug: "nasa-apod",
        path: "/api/nasa-apod",
        fields: &[FieldSpec {
            name: "date",
            label: "Date (YYYY-MM-DD, empty for today)",
            kind: FieldKind::Date,
            default: FieldDefault::Empty,
            presence: Presence::OmitEmpty,
        }],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("Fetch APOD"),
        kind: fetch(render::apod),
    },
    WidgetSpec {
        slug: "dictionary",
        path: "/api/dictionary",
        fields: &[FieldSpec::text("word", "Word", "example")],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("Lookup"),
        kind: fetch(render::json),
    },
    WidgetSpec {
        slug: "pokemon",
        path: "/api/pokemon",
        fields: &[FieldSpec::text("name", "Name", "ditto")],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("Fetch"),
        kind: fetch(render::pokemon),
    },
    WidgetSpec {
        slug: "meals",
        path: "/api/meal",
        fields: &[FieldSpec::text("search", "Search", "chicken")],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("Search"),
        kind: fetch(render::json),
    },
    WidgetSpec {
        slug: "color-info",
        path: "/api/color",
        fields: &[FieldSpec::text("hex", "Hex", "#ff5733")],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: Some("Get Color"),
        kind: fetch(render::color),
    },
    WidgetSpec {
        slug: "user-agent",
        path: "/api/user-agent",
        fields: &[],
        fixed_params: &[],
        activation: Activation::AutoLoad,
        trigger: None,
        kind: fetch(render::json),
    },
    WidgetSpec {
        slug: "favicon-fetcher",
        path: "/api/favicon",
        fields: &[FieldSpec::text("url", "Site URL", "https://example.com")],
        fixed_params: &[("size", "64")],
        activation: Activation::Manual,
        trigger: Some("Get Favicon"),
        kind: WidgetKind::Image {
            refresh: ImageRefresh::OnSubmit,
            alt: "favicon",
        },
    },
];
