//! Receipt PDF rendering.
//!
//! Writes a single-page PDF directly: one Helvetica text block with the
//! receipt fields and the barcode reference. Deterministic for a given
//! receipt, which the dedup tests rely on.

use haven::domain::RentReceipt;

/// Render a rent receipt to PDF bytes.
pub fn render_receipt(receipt: &RentReceipt) -> Vec<u8> {
    let lines = [
        "HAVEN RENT RECEIPT".to_string(),
        format!("Receipt ID: {}", receipt.id),
        format!("Payment ID: {}", receipt.payment_id),
        format!(
            "Amount: {} {}.{:02}",
            receipt.currency,
            receipt.amount_kobo / 100,
            receipt.amount_kobo % 100
        ),
        format!("Issued: {}", receipt.created_at.format("%Y-%m-%d")),
        format!(
            "Verification: {}",
            receipt.barcode_reference.as_deref().unwrap_or("-")
        ),
    ];

    let mut content = String::from("BT\n/F1 12 Tf\n1 0 0 1 72 760 Tm\n14 TL\n");
    for line in &lines {
        content.push('(');
        content.push_str(&escape_pdf_text(line));
        content.push_str(") Tj\nT*\n");
    }
    content.push_str("ET\n");

    build_document(content.as_bytes())
}

/// Assemble the fixed five-object document around a content stream.
fn build_document(stream: &[u8]) -> Vec<u8> {
    let objects: Vec<Vec<u8>> = vec![
        b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_vec(),
        b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n".to_vec(),
        b"3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595 842] \
/Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>\nendobj\n"
            .to_vec(),
        b"4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n".to_vec(),
        {
            let mut obj = format!("5 0 obj\n<< /Length {} >>\nstream\n", stream.len()).into_bytes();
            obj.extend_from_slice(stream);
            obj.extend_from_slice(b"\nendstream\nendobj\n");
            obj
        },
    ];

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for obj in &objects {
        offsets.push(out.len());
        out.extend_from_slice(obj);
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

fn escape_pdf_text(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            '(' => vec!['\\', '('],
            ')' => vec!['\\', ')'],
            '\\' => vec!['\\', '\\'],
            c if c.is_ascii() => vec![c],
            _ => vec!['?'],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn receipt() -> RentReceipt {
        let mut r = RentReceipt::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            1_500_000_00,
            "NGN".into(),
        );
        r.barcode_reference = Some("abc123".into());
        r
    }

    #[test]
    fn renders_well_formed_pdf() {
        let bytes = render_receipt(&receipt());
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("HAVEN RENT RECEIPT"));
        assert!(text.contains("NGN 1500000.00"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let r = receipt();
        assert_eq!(render_receipt(&r), render_receipt(&r));
    }

    #[test]
    fn escapes_pdf_delimiters() {
        assert_eq!(escape_pdf_text("a(b)c\\"), "a\\(b\\)c\\\\");
    }
}
