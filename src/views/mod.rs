use crate::models::Item;

/// Renders the inventory page. `db_connected` drives the status banner; the
/// item list is always empty when it is false.
pub fn render_index(items: &[Item], db_connected: bool) -> String {
    let mut page = String::with_capacity(2048);

    page.push_str(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Inventory</title>\n\
         <style>\n\
         body { font-family: sans-serif; margin: 2rem auto; max-width: 56rem; }\n\
         table { border-collapse: collapse; width: 100%; }\n\
         th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }\n\
         .banner { background: #fdd; border: 1px solid #c00; padding: 0.6rem 1rem; }\n\
         .attrs { color: #555; font-size: 0.9em; }\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <h1>Inventory</h1>\n",
    );

    if !db_connected {
        page.push_str(
            "<p class=\"banner\">Database disconnected &mdash; inventory is unavailable.</p>\n",
        );
    }

    page.push_str(
        "<table>\n<tr><th>Name</th><th>Price</th><th>Attributes</th><th></th></tr>\n",
    );
    for item in items {
        page.push_str("<tr><td>");
        page.push_str(&escape_html(&item.name));
        page.push_str("</td><td>");
        page.push_str(&item.price.to_string());
        page.push_str("</td><td class=\"attrs\">");
        for (i, (key, value)) in item.extra.iter().enumerate() {
            if i > 0 {
                page.push_str(", ");
            }
            page.push_str(&escape_html(key));
            page.push_str(": ");
            page.push_str(&escape_html(value));
        }
        page.push_str("</td><td>");
        if let Some(id) = &item.id {
            page.push_str(&format!(
                "<form method=\"post\" action=\"/delete/{}\"><button>Delete</button></form>",
                id.to_hex()
            ));
        }
        page.push_str("</td></tr>\n");
    }
    page.push_str("</table>\n");

    page.push_str(
        "<h2>Add item</h2>\n\
         <form method=\"post\" action=\"/add\">\n\
         <p><label>Name <input name=\"name\" required></label></p>\n\
         <p><label>Price <input name=\"price\" required></label></p>\n",
    );
    for _ in 0..3 {
        page.push_str(
            "<p><input name=\"field_key[]\" placeholder=\"attribute\"> \
             <input name=\"field_value[]\" placeholder=\"value\"></p>\n",
        );
    }
    page.push_str("<p><button>Add</button></p>\n</form>\n</body>\n</html>\n");

    page
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
