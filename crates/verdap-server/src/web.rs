//! HTTP handlers
//!
//! A deliberately thin HTML front end over the directory. The stock browsing
//! pages interpolate user input straight into the search filter; that is the
//! point of the lab and must stay that way. Only the category picker escapes
//! its parameter, so the two code paths can be contrasted.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};
use verdap_core::Error;
use verdap_directory::filter::escape_value;

use crate::client::DirectoryClient;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<DirectoryClient>,
}

fn html_header(title: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{title}</title></head><body>"
    )
}

fn html_footer() -> &'static str {
    "<hr /><p>verdap: an LDAP injection training lab. \
     All data is fictional and resets on restart.</p></body></html>"
}

fn search_failed(page: &mut String, err: &Error) {
    page.push_str(&format!(
        "<p>Search failed:<br />{} (result code {})</p>",
        err,
        err.result_code()
    ));
}

pub async fn index() -> Html<String> {
    let mut page = html_header("verdap");
    page.push_str(
        r#"
    <h1>verdap</h1>
    <p>
    The challenge... Useless Inc. runs its stock control system on the same
    directory server the network uses for authentication. Abuse that
    relationship to find details of the system users. As a bonus, the admins
    are known to store SSH keys in the directory.</p>
    <ul>
        <li><a href="/stock">Stock Control</a></li>
    </ul>
    <p>Extra features which can help if you get stuck.</p>
    <ul>
        <li><a href="/raw">Enter raw queries</a></li>
    </ul>
    "#,
    );
    page.push_str(html_footer());
    Html(page)
}

pub async fn stock() -> Html<String> {
    let mut page = html_header("Stock Control");
    page.push_str(
        r#"
    <h1>Stock Control</h1>
    <p>
    <a href="/">Main Menu</a>
    </p>
    <p>Please select a category:</p>
    <ul>
        <li><a href="/fruit_or_veg?objectClass=fruits">Fruit</a></li>
        <li><a href="/fruit_or_veg?objectClass=vegetables">Veg</a></li>
    </ul>
    "#,
    );
    page.push_str(html_footer());
    Html(page)
}

#[derive(Deserialize)]
pub struct CategoryQuery {
    #[serde(rename = "objectClass")]
    object_class: Option<String>,
}

/// Category listing. The parameter is stripped of parentheses and escaped
/// before it reaches the filter, so this page is not injectable.
pub async fn fruit_or_veg(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Response {
    let Some(category) = query.object_class else {
        info!("no category chosen, redirecting");
        return Redirect::to("/stock").into_response();
    };
    info!(%category, "category chosen");

    let category: String = category.chars().filter(|c| *c != '(' && *c != ')').collect();
    let mut page = html_header(&category);
    page.push_str(&format!(
        r#"
    <h1>{category}</h1>
    <p>
    <a href="/">Main Menu</a>
    </p>
    "#
    ));

    let filter = format!("(objectClass={})", escape_value(&category));
    let attributes = vec!["cn".to_string(), "description".to_string()];
    page.push_str(&format!("<!-- Search filter: {filter} -->"));

    match state.client.search(&filter, &attributes, 0) {
        Ok(entries) => {
            info!("returned {} result(s)", entries.len());
            page.push_str(&format!("Returned {} result(s)<br />", entries.len()));
            for entry in &entries {
                debug!(dn = %entry.dn, "listing entry");
                page.push_str(&format!("\n<!-- DN: {} -->\n", entry.dn));
                let cn = entry.first_value("cn").unwrap_or("");
                let description = entry.first_value("description").unwrap_or("");
                page.push_str(&format!("<h2>{cn}</h2>"));
                page.push_str(&format!("<p>{description}</p>"));
                page.push_str(&format!(
                    "<p><a href='/item?cn={}&disp=stock,description,cn'>More Info</a></p>",
                    urlencoding::encode(cn)
                ));
            }
        }
        Err(err) => search_failed(&mut page, &err),
    }

    page.push_str("<p><a href='/stock'>&laquo; Back</a></p>");
    page.push_str(html_footer());
    Html(page).into_response()
}

#[derive(Deserialize)]
pub struct ItemQuery {
    cn: Option<String>,
    disp: Option<String>,
}

/// Item detail. Both parameters flow into the search unescaped: `cn` into
/// the filter, `disp` into the attribute projection.
pub async fn item(State(state): State<AppState>, Query(query): Query<ItemQuery>) -> Response {
    let Some(cn) = query.cn else {
        debug!("no item chosen, redirecting");
        return Redirect::to("/stock").into_response();
    };
    debug!(%cn, "item chosen");

    let disp = query.disp.unwrap_or_else(|| "stock,cn,description".to_string());
    let disp = format!("{disp},objectClass");
    let attributes: Vec<String> = disp.split(',').map(str::to_string).collect();
    let filter = format!("(cn={cn})");

    let mut page = html_header(&cn);
    page.push_str(&format!("<!-- Search filter: {filter} -->"));

    match state.client.search(&filter, &attributes, 0) {
        Ok(entries) => {
            info!("returned {} result(s)", entries.len());
            if entries.is_empty() {
                page.push_str("<p>No results found</p>");
            } else {
                let entry = &entries[0];
                debug!(dn = %entry.dn, "showing entry");

                let mut cn = "";
                // default so Back still points somewhere
                let mut object_class = "fruits";
                let mut detail = String::new();
                for attr in &entry.attributes {
                    match attr.name.as_str() {
                        "cn" => cn = attr.values.first().map(String::as_str).unwrap_or(""),
                        "objectClass" => {
                            object_class =
                                attr.values.first().map(String::as_str).unwrap_or("fruits")
                        }
                        _ => detail.push_str(&format!(
                            "<dt>{}</dt><dd>{}</dd>",
                            attr.name,
                            attr.values.join(", ")
                        )),
                    }
                }

                page.push_str(&format!("<h1>{cn}</h1>"));
                page.push_str("<p><a href='/'>Main Menu</a></p>");
                page.push_str(&format!("<dl>{detail}</dl>"));
                page.push_str(&format!(
                    "<p><a href='/fruit_or_veg?objectClass={object_class}'>&laquo; Back</a></p>"
                ));
            }
        }
        Err(err) => search_failed(&mut page, &err),
    }

    page.push_str(html_footer());
    Html(page).into_response()
}

#[derive(Deserialize)]
pub struct RawQuery {
    #[serde(default)]
    filter: String,
    #[serde(default)]
    attributes: String,
}

/// Raw query console: filter and attribute list pass through verbatim.
pub async fn raw(State(state): State<AppState>, Query(query): Query<RawQuery>) -> Html<String> {
    let mut page = html_header("Raw Queries");
    page.push_str(&format!(
        r#"
    <h1>Raw Queries</h1>
    <p>
    <a href="/">Main Menu</a>
    </p>
    <p>Enter a raw query.</p>
    <form method="get">
        Filter: <input type="text" name="filter" id="filter" value="{}" /><br />
        Attributes: <input type="text" name="attributes" id="attributes" value="{}" /><br />
        <input type="submit" value="Search" name="search" />
    </form>
    "#,
        query.filter, query.attributes
    ));

    if !query.filter.is_empty() {
        info!(filter = %query.filter, attributes = %query.attributes, "raw query");
        let attributes: Vec<String> =
            query.attributes.split(',').map(str::to_string).collect();

        match state.client.search(&query.filter, &attributes, 0) {
            Ok(entries) => {
                info!("returned {} result(s)", entries.len());
                page.push_str(&format!("<p>Returned {} result(s)</p>", entries.len()));
                for entry in &entries {
                    page.push_str(&format!("<h2>DN: {}</h2>\n", entry.dn));
                    for attr in &entry.attributes {
                        page.push_str(&format!(
                            "<p>{}:{}</p>",
                            attr.name,
                            attr.values.join(", ")
                        ));
                    }
                }
            }
            Err(err) => search_failed(&mut page, &err),
        }
    }

    page.push_str(html_footer());
    Html(page)
}
