//! Static HTML rendering of invoices.

use std::fmt::Write;

use timberline_shared::types::format_amount;

use super::types::Invoice;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; color: #555; padding: 20px; }
.invoice-box { max-width: 800px; margin: auto; padding: 30px; border: 1px solid #eee; box-shadow: 0 0 10px rgba(0,0,0,.15); font-size: 16px; line-height: 24px; }
.invoice-box table { width: 100%; text-align: left; border-collapse: collapse; }
.invoice-box table td { padding: 5px; vertical-align: top; }
.heading td { background: #eee; border-bottom: 1px solid #ddd; font-weight: bold; }
.summary td { border-top: 1px solid #eee; }
.total td { border-top: 2px solid #eee; font-weight: bold; }
.text-right { text-align: right; }
.title { font-size: 45px; line-height: 45px; color: #333; }";

/// Render an invoice as a standalone HTML document.
///
/// All interpolated text is HTML-escaped.
#[must_use]
pub fn render_html(invoice: &Invoice) -> String {
    let mut items = String::new();
    for item in &invoice.line_items {
        // Writing into a String cannot fail.
        let _ = write!(
            items,
            "<tr class=\"item\"><td>{}</td><td class=\"text-right\">{}</td></tr>",
            escape(&item.description),
            format_amount(item.amount)
        );
    }

    let totals = &invoice.totals;
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Invoice {invoice_no}</title>
<style>
{STYLE}
</style>
</head>
<body>
<div class="invoice-box">
<table cellpadding="0" cellspacing="0">
<tr class="top"><td colspan="2"><table><tr><td class="title">INVOICE</td><td class="text-right">Inv #: {invoice_no}<br>Date: {invoice_date}</td></tr></table></td></tr>
<tr class="information"><td colspan="2"><table><tr><td><strong>{issuer_name}</strong><br>{issuer_address}</td><td class="text-right"><strong>Bill To:</strong><br>{bill_to}</td></tr></table></td></tr>
<tr class="heading"><td>Description</td><td class="text-right">Amount ({currency})</td></tr>
{items}
<tr class="summary"><td class="text-right">Subtotal</td><td class="text-right">{subtotal}</td></tr>
<tr class="summary"><td class="text-right">GST (15%)</td><td class="text-right">{gst}</td></tr>
<tr class="total"><td></td><td class="text-right">Total Due: {total_due}</td></tr>
</table>
</div>
</body>
</html>
"#,
        invoice_no = escape(&invoice.invoice_no),
        invoice_date = invoice.invoice_date.format("%Y-%m-%d"),
        issuer_name = escape(&invoice.issuer.name),
        issuer_address = escape(&invoice.issuer.address),
        bill_to = escape(&invoice.bill_to),
        currency = invoice.currency,
        subtotal = format_amount(totals.subtotal),
        gst = format_amount(totals.gst),
        total_due = format_amount(totals.total_due),
    )
}

/// Escape text for HTML element and attribute content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("Smith & Sons"), "Smith &amp; Sons");
        assert_eq!(
            escape("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }
}
