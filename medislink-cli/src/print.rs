use medislink_core::confirm::{ConfirmRequest, DialogTone};
use medislink_core::detail::{ToolPage, VERIFICATION_REQUIRED};
use medislink_core::models::format_indonesian_date;
use medislink_core::{AdminAction, AdminTab, Dashboard, Loan, News, Tool};

pub fn print_tools(tools: &[Tool]) {
    println!("Alat: {}", tools.len());
    for tool in tools {
        println!(
            "- [{}] {} | {} | stok {} | {}",
            tool.id,
            tool.name,
            tool.category,
            tool.stock,
            tool.condition_label()
        );
    }
}

pub fn print_tool_page(page: &ToolPage) {
    let tool = &page.tool;
    println!("{}", tool.name);
    println!("kategori: {}", tool.category);
    println!("tipe: {} | ukuran: {}", or_dash(&tool.kind), or_dash(&tool.size));
    println!("deskripsi: {}", tool.description_or_default());
    println!("dimensi: {}", tool.dimensions_or_dash());
    println!("kapasitas beban: {}", tool.weight_cap_or_dash());
    println!("kondisi: {}", tool.condition_label());
    println!("stok: {}", tool.stock);
    println!(
        "gambar: {}",
        tool.image_url.as_deref().unwrap_or(&tool.initial())
    );

    if !page.can_request_loan() {
        println!();
        println!("{VERIFICATION_REQUIRED}: lengkapi NIK dan foto KTP di profil.");
    } else if !tool.in_stock() {
        println!();
        println!("Stok alat sedang habis.");
    }
}

pub fn print_news(news: &News) {
    println!("{}", news.title);
    if let Some(date) = news.display_date() {
        println!("{date}");
    }
    println!("gambar: {}", news.cover_url());
    println!();
    println!("{}", news.content);
}

pub fn print_confirm_request(request: &ConfirmRequest<AdminAction>) {
    let tone = match request.tone {
        DialogTone::Danger => "BAHAYA",
        DialogTone::Warning => "PERHATIAN",
    };
    println!("[{tone}] {}", request.title);
    println!("{}", request.message);
}

pub fn print_dashboard(board: &Dashboard) {
    println!("{} ({})", board.header_name(), board.header_role());
    let tabs = AdminTab::ALL
        .iter()
        .map(|tab| {
            let label = tab.label(&board.data);
            if *tab == board.tab {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect::<Vec<_>>();
    println!("{}", tabs.join("  "));
    println!();
    print_tab(board);
}

pub fn print_tab(board: &Dashboard) {
    let data = &board.data;
    match board.tab {
        AdminTab::Loans => {
            for loan in &data.loans {
                print_loan(loan);
            }
        }
        AdminTab::Inventory => print_tools(&data.tools),
        AdminTab::News => {
            for news in &data.news {
                println!(
                    "- [{}] {} | {}",
                    news.id,
                    news.title,
                    news.display_date().unwrap_or_else(|| "-".to_string())
                );
            }
        }
        AdminTab::Ads => {
            for ad in &data.ads {
                println!("- [{}] {} | {} | {}", ad.id, ad.title, ad.image_url, or_dash(&ad.link));
            }
        }
        AdminTab::Donations => {
            for donation in &data.donations {
                println!(
                    "- [{}] {} x{} | {} | jemput {} | {}",
                    donation.id,
                    donation.tool_name,
                    donation.quantity,
                    donation.pickup_address,
                    donation
                        .pickup_date
                        .map(format_indonesian_date)
                        .unwrap_or_else(|| "-".to_string()),
                    donation.status
                );
            }
        }
    }
}

fn print_loan(loan: &Loan) {
    let dates = match (loan.loan_date, loan.return_due) {
        (Some(start), Some(due)) => format!(
            "{} - {}",
            format_indonesian_date(start),
            format_indonesian_date(due)
        ),
        (Some(start), None) => format_indonesian_date(start),
        _ => "-".to_string(),
    };
    let next = loan
        .status
        .next_steps()
        .iter()
        .map(|status| status.as_str())
        .collect::<Vec<_>>();

    println!(
        "- [{}] {} | {} | {} | {}{}",
        loan.id,
        loan.tool_name.as_deref().unwrap_or("-"),
        loan.borrower_name.as_deref().unwrap_or("-"),
        dates,
        loan.status,
        if next.is_empty() {
            String::new()
        } else {
            format!(" -> {}", next.join("/"))
        }
    );
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}
