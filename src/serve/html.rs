//! Pages for the browser calculator. Small enough to build with format strings.

use std::fmt::{Display, Write};

use crate::{
    clients::{ClientShares, ClientType},
    errors::PenaltyError,
    input::PenaltyType,
    penalties::{DoubleSigningReport, OfflineReport},
    units::EthNewtype,
};

const ETH_DECIMALS: usize = 9;

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<main>
<h1>{title}</h1>
{content}
</main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn client_options(client_shares: &ClientShares, client_type: ClientType) -> String {
    client_shares
        .client_names(client_type)
        .fold(String::new(), |mut options, client_name| {
            let client_name = escape_html(client_name);
            let _ = writeln!(
                options,
                r#"<option value="{client_name}">{client_name}</option>"#
            );
            options
        })
}

fn text_row(label: &str, value: impl Display) -> String {
    format!("<tr><th>{label}</th><td>{value}</td></tr>\n")
}

fn eth_row(label: &str, amount: EthNewtype) -> String {
    format!("<tr><th>{label}</th><td>{amount:.ETH_DECIMALS$} ETH</td></tr>\n")
}

const BACK_LINK: &str = r#"<p><a href="/">Calculate again</a></p>"#;

fn result_table(rows: &[String]) -> String {
    format!("<table>\n{}</table>\n{BACK_LINK}", rows.concat())
}

pub fn index_page(client_shares: &ClientShares) -> String {
    let offline = PenaltyType::Offline.form_label();
    let double_signing = PenaltyType::DoubleSigning.form_label();
    let execution_options = client_options(client_shares, ClientType::Execution);
    let consensus_options = client_options(client_shares, ClientType::Consensus);

    let form = format!(
        r#"<form method="post" action="/">
<label>Scenario
<select name="penalty_type">
<option value="{offline}">{offline}</option>
<option value="{double_signing}">{double_signing}</option>
</select>
</label>
<label>Validator Balance (ETH) <input name="balance" type="number" min="0" step="any" value="32"></label>
<label>Offline Duration (hours) <input name="offline_hours" type="number" min="0" step="any"></label>
<label>Time Since Finality (hours, optional) <input name="hours_since_finality" type="number" min="0" step="any"></label>
<label>Execution client
<select name="execution_client">
{execution_options}</select>
</label>
<label>Consensus client
<select name="consensus_client">
{consensus_options}</select>
</label>
<label><input name="include_correlated_penalty" type="checkbox" value="true"> Include correlated penalty</label>
<label>Correlation cause
<select name="correlation_cause">
<option value="execution">Execution client</option>
<option value="consensus">Consensus client</option>
</select>
</label>
<button type="submit">Calculate</button>
</form>
"#
    );

    layout("Validator Penalty Calculator", &form)
}

pub fn offline_result_page(report: &OfflineReport) -> String {
    let rows = [
        text_row("Offline epochs", report.offline_epochs),
        text_row("Epochs since finality", report.epochs_since_finality),
        eth_row("Inactivity penalty", report.inactivity_penalty_eth),
        eth_row("Missed attestation rewards", report.missed_rewards_eth),
    ];

    layout("Node Goes Offline", &result_table(&rows))
}

pub fn double_signing_result_page(report: &DoubleSigningReport) -> String {
    let base_penalty = report.base_slashing_penalty_eth;
    let mut rows = vec![eth_row("Base slashing penalty", base_penalty)];
    if report.include_correlated_penalty {
        if let (Some(client_type), Some(client_name)) =
            (report.correlation_cause, report.client_name.as_deref())
        {
            let client = format!("{} ({client_type})", escape_html(client_name));
            rows.push(text_row("Correlated client", client));
        }
        let additional = report.additional_correlated_penalty_eth;
        rows.push(eth_row("Additional correlated penalty", additional));
    }
    rows.push(eth_row("Long-term penalty", report.long_term_penalty_eth));
    rows.push(eth_row("Total penalty", report.total_penalty_eth));

    layout("Double Signing", &result_table(&rows))
}

pub fn error_page(error: &PenaltyError) -> String {
    let content = format!(
        "<p class=\"error\">{}</p>\n{BACK_LINK}",
        escape_html(&error.to_string())
    );
    layout("Error", &content)
}
