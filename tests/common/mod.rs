//! Shared fixtures for the integration suite.

/// Generates a portal-style front page with a known shape:
///
/// - exactly 160 anchors, all of them inside `div`s: 8 hand-placed in the
///   masthead plus 8 navigation columns of 19 items each;
/// - `t1` and `allyservices` are the only anchors carrying both `@id` and
///   `@class`;
/// - `vsearchmore` and `worldnews` are the only `@id` values ordering after
///   the string `"v"`;
/// - the first element child of `body` is a `text/javascript` script;
/// - exactly two `p` elements.
pub fn portal_page() -> String {
    let mut html = String::new();
    html.push_str("<html><head><title>Daily Portal</title></head><body>");
    html.push_str("<script type=\"text/javascript\">var page = \"home\";</script>");
    html.push_str("<div id=\"page\">");

    html.push_str("<div id=\"masthead\">");
    html.push_str("<a id=\"t1\" class=\"logo\" href=\"/\">Daily Portal</a>");
    html.push_str("<a id=\"allyservices\" class=\"services\" href=\"/services\">All services</a>");
    html.push_str("<a id=\"vsearchmore\" href=\"/search\">More search options</a>");
    html.push_str("<a id=\"worldnews\" href=\"/news/world\">World</a>");
    html.push_str("<a id=\"mail\" href=\"/mail\">Mail</a>");
    html.push_str("<a id=\"finance\" href=\"/finance\">Finance</a>");
    html.push_str("<a id=\"sports\" href=\"/sports\">Sports</a>");
    html.push_str("<a id=\"localweather\" href=\"/weather\">Weather</a>");
    html.push_str("</div>");

    for section in 0..8 {
        html.push_str(&format!(
            "<div class=\"nav-col\"><h2>Section {section}</h2><ul>"
        ));
        for item in 0..19 {
            html.push_str(&format!(
                "<li><a href=\"/s{section}/item{item}\">Item {item}</a></li>"
            ));
        }
        html.push_str("</ul></div>");
    }

    html.push_str("<div id=\"content\">");
    html.push_str("<p>Welcome to the portal front page.</p>");
    html.push_str("<p>All headlines are refreshed hourly.</p>");
    html.push_str("</div>");

    html.push_str("</div></body></html>");
    html
}

/// The nested-div snippet that locks the engine's recursive-predicate quirk.
pub const NESTED_DIVS: &str = "<div><span>Foo</span><div>Bar</div></div>";
